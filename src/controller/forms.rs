use super::*;

use crate::validation::{
    ControlSnapshot, SUCCESS_BANNER_STYLE, SUCCESS_MESSAGE, input_clears_error, live_check,
};

#[derive(Debug)]
pub(super) struct BoundForm {
    pub(super) profile: FormProfile,
    pub(super) form: NodeId,
    pub(super) state: FormState,
    pub(super) last_failures: Vec<FieldFailure>,
}

impl PageController {
    pub(super) fn bind_forms(&mut self, host: &mut Host<'_>) -> Result<()> {
        for profile in self.config.forms.clone() {
            let Some(form) = host.dom.by_id(&profile.form_id) else {
                continue;
            };
            let index = self.forms.len();
            self.listeners
                .add(form, EventKind::Submit, Handler::SubmitForm { form: index });
            for control in host.dom.query_selector_all_from(form, &profile.live_controls)? {
                self.listeners
                    .add(control, EventKind::Blur, Handler::LiveValidate { form: index });
                self.listeners.add(
                    control,
                    EventKind::Input,
                    Handler::ClearErrorOnInput { form: index },
                );
            }
            self.forms.push(BoundForm {
                profile,
                form,
                state: FormState::Pristine,
                last_failures: Vec::new(),
            });
        }
        Ok(())
    }

    pub(super) fn submit_form(
        &mut self,
        host: &mut Host<'_>,
        index: usize,
        event: &mut EventState,
    ) -> Result<()> {
        event.prevent_default();
        let Some(bound) = self.forms.get_mut(index) else {
            return Ok(());
        };
        bound.state = FormState::Validating;
        let form = bound.form;

        for group in host.dom.query_selector_all_from(form, ".form-group")? {
            host.dom.class_remove(group, "error")?;
            if bound.profile.blank_messages_on_submit {
                if let Some(message) = host.dom.query_selector_from(group, ".error-message")? {
                    host.dom.set_text_content(message, "")?;
                }
            }
        }

        let dom = &*host.dom;
        let failures = bound
            .profile
            .check_submission(|id| dom.by_id(id).and_then(|node| dom.value(node).ok()));

        for failure in &failures {
            if let Some(field) = host.dom.by_id(&failure.field_id) {
                show_field_error(host.dom, field, &failure.message)?;
            }
        }

        tracing::debug!(
            form = %bound.profile.form_id,
            failures = failures.len(),
            "form submitted"
        );

        if !failures.is_empty() {
            bound.state = FormState::Invalid;
            bound.last_failures = failures;
            return Ok(());
        }

        bound.state = FormState::Valid;
        bound.last_failures.clear();
        show_success_banner(host, form, self.config.banner_dismiss_ms)?;
        host.dom.reset_form(form)?;
        bound.state = FormState::Submitted;
        Ok(())
    }

    pub(super) fn live_validate(
        &mut self,
        host: &mut Host<'_>,
        index: usize,
        control: NodeId,
    ) -> Result<()> {
        let Some(bound) = self.forms.get(index) else {
            return Ok(());
        };
        let snapshot = snapshot_control(host.dom, control)?;
        match live_check(&snapshot, &bound.profile) {
            Some(message) => show_field_error(host.dom, control, message),
            None => {
                let Some(group) = host.dom.closest(control, ".form-group")? else {
                    return Ok(());
                };
                clear_group_error(host.dom, group, bound.profile.error_clearing)
            }
        }
    }

    pub(super) fn clear_error_on_input(
        &mut self,
        host: &mut Host<'_>,
        index: usize,
        control: NodeId,
    ) -> Result<()> {
        let Some(bound) = self.forms.get(index) else {
            return Ok(());
        };
        let Some(group) = host.dom.closest(control, ".form-group")? else {
            return Ok(());
        };
        if !host.dom.class_contains(group, "error")? {
            return Ok(());
        }
        let snapshot = snapshot_control(host.dom, control)?;
        if input_clears_error(&snapshot) {
            clear_group_error(host.dom, group, bound.profile.error_clearing)?;
        }
        Ok(())
    }
}

fn snapshot_control(dom: &Dom, control: NodeId) -> Result<ControlSnapshot> {
    Ok(ControlSnapshot {
        id: dom.attr(control, "id"),
        input_type: dom.input_type(control),
        is_select: crate::dom::is_select_element(dom, control),
        required: dom.required(control),
        value: dom.value(control)?,
    })
}

/// Flags the control's group and writes `message` into its single `.error-message`.
fn show_field_error(dom: &mut Dom, control: NodeId, message: &str) -> Result<()> {
    let Some(group) = dom.closest(control, ".form-group")? else {
        return Ok(());
    };
    dom.class_add(group, "error")?;
    let node = match dom.query_selector_from(group, ".error-message")? {
        Some(existing) => existing,
        None => {
            let span = dom.create_detached_element("span");
            dom.class_add(span, "error-message")?;
            dom.append_child(group, span)?;
            span
        }
    };
    dom.set_text_content(node, message)
}

fn clear_group_error(dom: &mut Dom, group: NodeId, mode: ErrorClearing) -> Result<()> {
    dom.class_remove(group, "error")?;
    let Some(message) = dom.query_selector_from(group, ".error-message")? else {
        return Ok(());
    };
    match mode {
        ErrorClearing::RemoveNode => dom.remove_node(message),
        ErrorClearing::BlankText => dom.set_text_content(message, ""),
    }
}

/// Replaces any earlier banner and schedules the new one's removal.
fn show_success_banner(host: &mut Host<'_>, form: NodeId, dismiss_ms: i64) -> Result<()> {
    if let Some(existing) = host.dom.query_selector_from(form, ".form-success")? {
        host.dom.remove_node(existing)?;
    }

    let banner = host.dom.create_detached_element("div");
    host.dom.class_add(banner, "form-success")?;
    host.dom.set_style_text(banner, SUCCESS_BANNER_STYLE)?;
    host.dom.set_text_content(banner, SUCCESS_MESSAGE)?;
    host.dom.prepend_child(form, banner)?;

    let id = host
        .scheduler
        .schedule(TimerTask::DismissBanner { banner }, dismiss_ms);
    host.trace.timer_line(format!(
        "[timer] banner dismiss id={id} delay_ms={dismiss_ms}"
    ));
    Ok(())
}
