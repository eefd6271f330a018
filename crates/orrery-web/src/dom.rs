//! DOM bindings for the page controls.
//!
//! Controls never touch game state directly: every DOM event becomes an
//! `InputEvent` pushed through the caller's sink, and the HUD snapshot is
//! written back to the page after each frame.

use std::rc::Rc;
use orrery_engine::input::queue::keys;
use orrery_engine::{HudState, InputEvent, PanelContent, UiCommand};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, HtmlInputElement, KeyboardEvent};

pub const TOGGLE_BUTTON_ID: &str = "toggleBtn";
pub const SPEED_INPUT_ID: &str = "speedControl";
pub const RESET_BUTTON_ID: &str = "resetBtn";
pub const INFO_PANEL_ID: &str = "infoPanel";
pub const PANEL_CONTENT_ID: &str = "infoContent";
pub const CLOSE_PANEL_ID: &str = "closePanel";
/// Set on the panel body to the title it currently shows.
const PANEL_TITLE_ATTR: &str = "data-title";

/// Receives input produced by DOM listeners.
pub type InputSink = Rc<dyn Fn(InputEvent)>;

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn element<T: JsCast>(doc: &Document, id: &str) -> Result<T, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{} has the wrong element type", id)))
}

fn listen(target: &web_sys::EventTarget, kind: &str, f: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(Event)>::new(f);
    target.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    cb.forget();
    Ok(())
}

fn on_click(doc: &Document, id: &str, sink: &InputSink, cmd: UiCommand) -> Result<(), JsValue> {
    let el: HtmlElement = element(doc, id)?;
    let sink = sink.clone();
    listen(&el, "click", move |_| sink(cmd.to_event()))
}

/// Wire the page controls and keyboard shortcuts to `sink`.
pub fn bind_controls(sink: InputSink) -> Result<(), JsValue> {
    let doc = document()?;

    on_click(&doc, TOGGLE_BUTTON_ID, &sink, UiCommand::TogglePlayback)?;
    on_click(&doc, RESET_BUTTON_ID, &sink, UiCommand::Reset)?;
    on_click(&doc, CLOSE_PANEL_ID, &sink, UiCommand::ClosePanel)?;

    let slider: HtmlInputElement = element(&doc, SPEED_INPUT_ID)?;
    {
        let sink = sink.clone();
        let input = slider.clone();
        listen(&slider, "input", move |_| match parse_speed(&input.value()) {
            Some(speed) => sink(UiCommand::SetSpeed(speed).to_event()),
            None => log::warn!("ignoring speed value {:?}", input.value()),
        })?;
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let sink = sink.clone();
    listen(&window, "keydown", move |e| {
        let Some(key) = e.dyn_ref::<KeyboardEvent>() else { return };
        // Typing into the slider should not trigger shortcuts.
        if e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()).is_some() {
            return;
        }
        let code = key.key_code();
        if matches!(code, keys::SPACE | keys::R | keys::ESCAPE) {
            if code == keys::SPACE {
                e.prevent_default();
            }
            sink(InputEvent::KeyDown { key_code: code });
        }
    })?;

    log::info!("page controls bound");
    Ok(())
}

/// Slider text to a speed. Non-numeric, non-finite and negative input is rejected.
pub fn parse_speed(value: &str) -> Option<f32> {
    let speed: f32 = value.trim().parse().ok()?;
    (speed.is_finite() && speed >= 0.0).then_some(speed)
}

pub fn toggle_label(playing: bool) -> &'static str {
    if playing { "Pause" } else { "Play" }
}

/// One block of the detail panel. Text is set as node text, never parsed as markup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLine<'a> {
    pub tag: &'static str,
    pub class: Option<&'static str>,
    /// Bold prefix, rendered as `label:`.
    pub label: Option<&'a str>,
    pub text: &'a str,
}

/// Detail panel layout: heading, one paragraph per row, then the description.
pub fn panel_lines(panel: &PanelContent) -> Vec<PanelLine<'_>> {
    let mut lines = Vec::with_capacity(panel.rows.len() + 2);
    lines.push(PanelLine { tag: "h2", class: None, label: None, text: panel.title.as_str() });
    for row in &panel.rows {
        lines.push(PanelLine { tag: "p", class: None, label: Some(row.label.as_str()), text: row.value.as_str() });
    }
    if !panel.description.is_empty() {
        lines.push(PanelLine { tag: "p", class: Some("description"), label: None, text: panel.description.as_str() });
    }
    lines
}

fn render_panel(doc: &Document, body: &HtmlElement, panel: &PanelContent) -> Result<(), JsValue> {
    body.set_text_content(None);
    for line in panel_lines(panel) {
        let el = doc.create_element(line.tag)?;
        if let Some(class) = line.class {
            el.set_class_name(class);
        }
        if let Some(label) = line.label {
            let strong = doc.create_element("strong")?;
            strong.set_text_content(Some(&format!("{}:", label)));
            el.append_child(&strong)?;
            el.append_child(&doc.create_text_node(&format!(" {}", line.text)))?;
        } else {
            el.set_text_content(Some(line.text));
        }
        body.append_child(&el)?;
    }
    body.set_attribute(PANEL_TITLE_ATTR, &panel.title)?;
    Ok(())
}

/// Write the HUD snapshot into the page.
pub fn apply_hud(hud: &HudState) -> Result<(), JsValue> {
    let doc = document()?;

    let toggle: HtmlElement = element(&doc, TOGGLE_BUTTON_ID)?;
    let label = toggle_label(hud.playing);
    if toggle.text_content().as_deref() != Some(label) {
        toggle.set_text_content(Some(label));
    }

    let panel: HtmlElement = element(&doc, INFO_PANEL_ID)?;
    match &hud.panel {
        Some(content) => {
            let body: HtmlElement = element(&doc, PANEL_CONTENT_ID)?;
            // Panel content is fixed per body, so the title identifies it.
            if body.get_attribute(PANEL_TITLE_ATTR).as_deref() != Some(content.title.as_str()) {
                render_panel(&doc, &body, content)?;
            }
            panel.set_hidden(false);
        }
        None => panel.set_hidden(true),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::PanelRow;

    #[test]
    fn speed_parsing_rejects_junk() {
        assert_eq!(parse_speed("0.05"), Some(0.05));
        assert_eq!(parse_speed(" 0 "), Some(0.0));
        assert_eq!(parse_speed("-0.1"), None);
        assert_eq!(parse_speed("abc"), None);
        assert_eq!(parse_speed("inf"), None);
        assert_eq!(parse_speed("NaN"), None);
    }

    #[test]
    fn toggle_label_tracks_playback() {
        assert_eq!(toggle_label(true), "Pause");
        assert_eq!(toggle_label(false), "Play");
    }

    #[test]
    fn panel_lines_keep_text_verbatim() {
        let panel = PanelContent {
            title: "Earth".into(),
            rows: vec![
                PanelRow::new("Type", "Terrestrial Planet"),
                PanelRow::new("Temperature", "-88°C to 58°C"),
            ],
            description: "Home <3".into(),
        };
        let lines = panel_lines(&panel);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], PanelLine { tag: "h2", class: None, label: None, text: "Earth" });
        assert_eq!(lines[1].label, Some("Type"));
        assert_eq!(lines[2].text, "-88°C to 58°C");
        assert_eq!(lines[3].class, Some("description"));
        assert_eq!(lines[3].text, "Home <3");
    }

    #[test]
    fn empty_description_is_omitted() {
        let panel = PanelContent {
            title: "Sun".into(),
            rows: vec![PanelRow::new("Moons", "0")],
            description: String::new(),
        };
        let lines = panel_lines(&panel);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.class.is_none()));
    }
}
