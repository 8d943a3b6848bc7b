//! Reveal-on-scroll visibility tracking.
//!
//! Elements are registered with their vertical extent in page rows. Each time
//! the viewport moves, every element whose visible share reaches the
//! threshold is marked revealed. Reveal is one-way: scrolling the element back
//! out of view does not hide it again.

/// Share of an element's height that must intersect the viewport.
pub const DEFAULT_REVEAL_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone, PartialEq)]
struct ObservedElement {
    id: String,
    top: u16,
    height: u16,
    revealed: bool,
}

impl ObservedElement {
    fn intersection_ratio(&self, viewport_top: u16, viewport_height: u16) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        let top = u32::from(self.top);
        let bottom = top + u32::from(self.height);
        let view_top = u32::from(viewport_top);
        let view_bottom = view_top + u32::from(viewport_height);
        let overlap = bottom.min(view_bottom).saturating_sub(top.max(view_top));
        overlap as f32 / f32::from(self.height)
    }
}

/// Generic observer marking registered elements as revealed once they scroll into view.
#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    threshold: f32,
    elements: Vec<ObservedElement>,
}

impl Default for VisibilityObserver {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_THRESHOLD)
    }
}

impl VisibilityObserver {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            elements: Vec::new(),
        }
    }

    /// Registers `id` or updates its extent; an element keeps its revealed state across relayouts.
    pub fn observe(&mut self, id: &str, top: u16, height: u16) {
        match self.elements.iter_mut().find(|element| element.id == id) {
            Some(element) => {
                element.top = top;
                element.height = height;
            }
            None => self.elements.push(ObservedElement {
                id: id.to_string(),
                top,
                height,
                revealed: false,
            }),
        }
    }

    pub fn unobserve(&mut self, id: &str) {
        self.elements.retain(|element| element.id != id);
    }

    /// Applies the current viewport and returns the ids revealed by this update.
    pub fn update(&mut self, viewport_top: u16, viewport_height: u16) -> Vec<String> {
        let mut newly_revealed = Vec::new();
        for element in self.elements.iter_mut().filter(|element| !element.revealed) {
            let ratio = element.intersection_ratio(viewport_top, viewport_height);
            if ratio > 0.0 && ratio >= self.threshold {
                element.revealed = true;
                newly_revealed.push(element.id.clone());
            }
        }
        newly_revealed
    }

    /// Unknown ids are reported as revealed so unregistered content is never hidden.
    pub fn is_revealed(&self, id: &str) -> bool {
        self.elements
            .iter()
            .find(|element| element.id == id)
            .is_none_or(|element| element.revealed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_at_ten_percent_and_stays_revealed() {
        let mut observer = VisibilityObserver::default();
        observer.observe("services", 20, 20);

        // 1 of 20 rows visible: 5%
        assert!(observer.update(0, 21).is_empty());
        assert!(!observer.is_revealed("services"));

        // 2 of 20 rows visible: 10%
        assert_eq!(observer.update(0, 22), vec!["services".to_string()]);
        assert!(observer.is_revealed("services"));

        // scrolled away, still revealed and not reported again
        assert!(observer.update(200, 10).is_empty());
        assert!(observer.is_revealed("services"));
    }

    #[test]
    fn relayout_keeps_revealed_state() {
        let mut observer = VisibilityObserver::default();
        observer.observe("hero", 0, 10);
        observer.update(0, 10);
        observer.observe("hero", 0, 14);
        assert!(observer.is_revealed("hero"));
    }

    #[test]
    fn unknown_and_unobserved_ids_render_visible() {
        let mut observer = VisibilityObserver::default();
        observer.observe("process", 100, 10);
        assert!(!observer.is_revealed("process"));
        observer.unobserve("process");
        assert!(observer.is_revealed("process"));
        assert!(observer.is_revealed("never-registered"));
    }

    #[test]
    fn zero_height_elements_never_reveal() {
        let mut observer = VisibilityObserver::new(0.0);
        observer.observe("empty", 0, 0);
        assert!(observer.update(0, 50).is_empty());
    }
}
