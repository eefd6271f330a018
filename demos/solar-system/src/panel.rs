use orrery_engine::{PanelContent, PanelRow};
use crate::bodies::BodyInfo;

/// Detail panel content for a selected body.
pub fn panel_for(info: &BodyInfo) -> PanelContent {
    PanelContent {
        title: info.name.to_string(),
        rows: vec![
            PanelRow::new("Type", info.kind.label()),
            PanelRow::new("Distance from Sun", info.distance),
            PanelRow::new("Diameter", info.diameter),
            PanelRow::new("Day Length", info.day_length),
            PanelRow::new("Year Length", info.year_length),
            PanelRow::new("Temperature", info.temperature),
            PanelRow::new("Moons", info.moons.to_string()),
        ],
        description: info.description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{EARTH, PLANET_INFO, SUN_INFO};

    fn row<'a>(panel: &'a PanelContent, label: &str) -> Option<&'a str> {
        panel.rows.iter().find(|r| r.label == label).map(|r| r.value.as_str())
    }

    #[test]
    fn earth_panel_lists_every_fact() {
        let panel = panel_for(&PLANET_INFO[EARTH]);
        assert_eq!(panel.title, "Earth");
        assert_eq!(panel.rows.len(), 7);
        assert_eq!(row(&panel, "Type"), Some("Terrestrial Planet"));
        assert_eq!(row(&panel, "Distance from Sun"), Some("149.6 million km"));
        assert_eq!(row(&panel, "Moons"), Some("1"));
        assert!(panel.description.contains("life"));
    }

    #[test]
    fn sun_panel_has_no_moons() {
        let panel = panel_for(&SUN_INFO);
        assert_eq!(panel.title, "Sun");
        assert_eq!(row(&panel, "Moons"), Some("0"));
        assert!(row(&panel, "Type").is_some_and(|t| t.starts_with("Star")));
    }
}
