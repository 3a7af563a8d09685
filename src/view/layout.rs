use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleChange {
    Accepted,
    Restored { property: String, pinned: String },
}

/// Pinned navigation bar style. Pins are applied once; afterwards only a
/// change that conflicts with a pin is reverted, everything else is kept.
#[derive(Debug)]
pub struct NavbarLayout {
    pins: Vec<(String, String)>,
    style: BTreeMap<String, String>,
    applied: bool,
}

impl NavbarLayout {
    pub fn new(pins: Vec<(String, String)>) -> Self {
        Self {
            pins,
            style: BTreeMap::new(),
            applied: false,
        }
    }

    /// Returns the number of pinned properties written; zero on repeat calls.
    pub fn apply(&mut self) -> usize {
        if self.applied {
            return 0;
        }
        for (property, value) in &self.pins {
            self.style.insert(property.clone(), value.clone());
        }
        self.applied = true;
        self.pins.len()
    }

    pub fn observe(&mut self, property: &str, value: &str) -> StyleChange {
        let pinned = self
            .pins
            .iter()
            .find(|(pinned_property, _)| pinned_property == property)
            .map(|(_, pinned_value)| pinned_value.clone());

        match pinned {
            Some(pinned) if self.applied && pinned != value => {
                self.style.insert(property.to_string(), pinned.clone());
                StyleChange::Restored {
                    property: property.to_string(),
                    pinned,
                }
            }
            _ => {
                self.style.insert(property.to_string(), value.to_string());
                StyleChange::Accepted
            }
        }
    }

    pub fn style(&self) -> &BTreeMap<String, String> {
        &self.style
    }
}

#[cfg(test)]
mod tests {
    use super::{NavbarLayout, StyleChange};

    fn layout() -> NavbarLayout {
        NavbarLayout::new(vec![
            ("position".to_string(), "fixed".to_string()),
            ("z-index".to_string(), "9999".to_string()),
        ])
    }

    #[test]
    fn applies_pins_once() {
        let mut layout = layout();
        assert_eq!(layout.apply(), 2);
        assert_eq!(layout.apply(), 0);
        assert_eq!(
            layout.style().get("position").map(String::as_str),
            Some("fixed")
        );
    }

    #[test]
    fn restores_only_conflicting_pinned_properties() {
        let mut layout = layout();
        layout.apply();

        assert_eq!(
            layout.observe("position", "sticky"),
            StyleChange::Restored {
                property: "position".to_string(),
                pinned: "fixed".to_string(),
            }
        );
        assert_eq!(layout.observe("z-index", "9999"), StyleChange::Accepted);
        assert_eq!(layout.observe("background", "#E50038"), StyleChange::Accepted);

        assert_eq!(
            layout.style().get("position").map(String::as_str),
            Some("fixed")
        );
        assert_eq!(
            layout.style().get("background").map(String::as_str),
            Some("#E50038")
        );
    }
}
