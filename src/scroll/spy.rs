/// Active section for navigation highlighting.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScrollSpyState {
    /// Id of the active section, if any section has been reached.
    pub active_section_id: Option<String>,
}

/// Pick the active section: scanning from the last section upward, the first whose top is at
/// or above `scroll_y + offset`.
///
/// `sections` pairs each id with its document-space top, in navigation order.
pub fn active_section<'a>(
    sections: impl DoubleEndedIterator<Item = (&'a str, f64)>,
    scroll_y: f64,
    offset: f64,
) -> Option<&'a str> {
    let probe = scroll_y + offset;
    sections
        .rev()
        .find(|(_, top)| *top <= probe)
        .map(|(id, _)| id)
}

/// Tracks section ids and the currently active one.
#[derive(Clone, Debug)]
pub struct ScrollSpy {
    section_ids: Vec<String>,
    offset: f64,
    state: ScrollSpyState,
}

impl ScrollSpy {
    /// Watch `section_ids` (navigation order) with a probe `offset` below the scroll position.
    pub fn new(section_ids: Vec<String>, offset: f64) -> Self {
        Self {
            section_ids,
            offset,
            state: ScrollSpyState::default(),
        }
    }

    /// Watched ids in navigation order.
    pub fn section_ids(&self) -> &[String] {
        &self.section_ids
    }

    /// Append a section to the end of the navigation order. Duplicate ids are ignored.
    pub fn add_section(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.section_ids.contains(&id) {
            self.section_ids.push(id);
        }
    }

    /// Stop tracking a section. Clears the active id if it pointed there.
    pub fn remove_section(&mut self, id: &str) {
        self.section_ids.retain(|s| s != id);
        if self.state.active_section_id.as_deref() == Some(id) {
            self.state.active_section_id = None;
        }
    }

    /// Probe offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Current state.
    pub fn state(&self) -> &ScrollSpyState {
        &self.state
    }

    /// Recompute from section tops. Sections `top_of` cannot resolve are skipped.
    ///
    /// Returns the new active id when it changed (`Some(None)` when no section is active any
    /// more).
    pub fn update(
        &mut self,
        scroll_y: f64,
        mut top_of: impl FnMut(&str) -> Option<f64>,
    ) -> Option<Option<String>> {
        let resolved: Vec<(&str, f64)> = self
            .section_ids
            .iter()
            .filter_map(|id| top_of(id).map(|top| (id.as_str(), top)))
            .collect();
        let next = active_section(resolved.into_iter(), scroll_y, self.offset).map(str::to_owned);
        if next == self.state.active_section_id {
            return None;
        }
        tracing::debug!(active = ?next, "scroll-spy section changed");
        self.state.active_section_id = next.clone();
        Some(next)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/spy.rs"]
mod tests;
