use super::*;

use serde::{Deserialize, Serialize};

/// When the narrow-viewport check for dropdown toggling happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropdownGate {
    /// Checked once while binding; a page loaded wide never toggles dropdowns on click.
    #[default]
    AtBind,
    /// Every trigger is bound and the width is checked on each click.
    PerClick,
}

/// Every tunable the page behaviors read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub header_scroll_threshold: f64,
    pub scroll_top_threshold: f64,
    pub mobile_breakpoint: f64,
    pub anchor_header_offset: f64,
    pub resize_debounce_ms: i64,
    pub banner_dismiss_ms: i64,
    pub reveal_threshold: f64,
    pub reveal_bottom_margin: f64,
    pub reveal_selector: String,
    pub dropdown_gate: DropdownGate,
    pub timer_step_limit: usize,
    pub forms: Vec<FormProfile>,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            header_scroll_threshold: 100.0,
            scroll_top_threshold: 500.0,
            mobile_breakpoint: 968.0,
            anchor_header_offset: 80.0,
            resize_debounce_ms: 250,
            banner_dismiss_ms: 5_000,
            reveal_threshold: 0.1,
            reveal_bottom_margin: 50.0,
            reveal_selector: ".service-card, .feature-box, .news-card, .about-image-item".into(),
            dropdown_gate: DropdownGate::AtBind,
            timer_step_limit: 10_000,
            forms: vec![FormProfile::appointment(), FormProfile::contact()],
        }
    }
}

impl InteractionConfig {
    /// Parses and validates a JSON document; absent keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| Error::Config(format!("invalid configuration JSON: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.resize_debounce_ms <= 0 {
            return Err(Error::Config(format!(
                "resize_debounce_ms must be positive (got {})",
                self.resize_debounce_ms
            )));
        }
        if self.banner_dismiss_ms < 0 {
            return Err(Error::Config(format!(
                "banner_dismiss_ms must not be negative (got {})",
                self.banner_dismiss_ms
            )));
        }
        if !(self.reveal_threshold > 0.0 && self.reveal_threshold <= 1.0) {
            return Err(Error::Config(format!(
                "reveal_threshold must be in (0, 1] (got {})",
                self.reveal_threshold
            )));
        }
        if self.timer_step_limit == 0 {
            return Err(Error::Config(
                "timer_step_limit requires at least 1".into(),
            ));
        }
        SelectorList::parse(&self.reveal_selector).map_err(|err| {
            Error::Config(format!("reveal_selector is not supported: {err}"))
        })?;
        for form in &self.forms {
            if form.form_id.is_empty() {
                return Err(Error::Config("form profile without a form_id".into()));
            }
            SelectorList::parse(&form.live_controls).map_err(|err| {
                Error::Config(format!(
                    "live_controls of {} is not supported: {err}",
                    form.form_id
                ))
            })?;
        }
        Ok(())
    }
}
