//! Playback of the embedded target-reached cue.

use log::warn;
use target_stopwatch::config::BEEP_DATA_URI;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

/// Owns the preloaded `<audio>` element for the beep.
pub struct Beeper {
    element: Option<HtmlAudioElement>,
}

impl Beeper {
    pub fn new() -> Self {
        let element = match HtmlAudioElement::new_with_src(BEEP_DATA_URI) {
            Ok(el) => {
                el.set_preload("auto");
                Some(el)
            }
            Err(e) => {
                warn!("Audio cue unavailable: {}", describe(&e));
                None
            }
        };
        Self { element }
    }

    /// Restart the cue from the beginning. Browsers may refuse playback
    /// (autoplay policy); that is logged and otherwise ignored.
    pub fn play(&self) {
        let Some(el) = &self.element else {
            return;
        };
        el.set_current_time(0.0);
        match el.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    warn!("Audio cue rejected: {}", describe(&e));
                }
            }),
            Err(e) => warn!("Audio cue failed to start: {}", describe(&e)),
        }
    }
}

impl Default for Beeper {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
