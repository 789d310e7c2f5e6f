use super::*;

impl PageController {
    pub(super) fn observe_reveal_targets(&mut self, host: &mut Host<'_>) -> Result<()> {
        let targets = host.dom.query_selector_all(&self.config.reveal_selector)?;
        for target in targets {
            host.dom.class_add(target, "fade-in")?;
            self.observer.observe(target);
        }
        tracing::debug!(observed = self.observer.len(), "reveal targets observed");
        Ok(())
    }

    /// Applies pending observer entries. `visible` is only ever added.
    pub(super) fn reveal(&mut self, host: &mut Host<'_>) -> Result<()> {
        for entry in self.observer.poll(host.layout, host.window) {
            if entry.is_intersecting {
                host.dom.class_add(entry.target, "visible")?;
                tracing::debug!(node = entry.target.0, ratio = entry.ratio, "revealed");
            }
        }
        Ok(())
    }
}
