//! Pure Yew view components for the stopwatch panel.
//!
//! These components render from props only; all timing state lives in the
//! `Timekeeper` owned by the root component.

use target_stopwatch::{NotifyPolicy, TimeParts};
use yew::prelude::*;

/// Text for the transient banner shown after a notification.
pub fn reached_message(policy: NotifyPolicy, target_minutes: u32, multiple: u64) -> String {
    match policy {
        NotifyPolicy::Once => format!("{} minutes reached!", target_minutes),
        NotifyPolicy::EveryMultiple if multiple <= 1 => {
            format!("{} minutes reached!", target_minutes)
        }
        NotifyPolicy::EveryMultiple => format!(
            "{}× target reached ({} minutes)",
            multiple,
            u64::from(target_minutes) * multiple
        ),
    }
}

#[derive(Properties, PartialEq)]
pub struct TimeDisplayProps {
    pub elapsed_ms: u64,
    pub at_target: bool,
}

/// Large `MM:SS.cc` readout; centiseconds are rendered smaller.
#[function_component(TimeDisplay)]
pub fn time_display(props: &TimeDisplayProps) -> Html {
    let parts = TimeParts::from_ms(props.elapsed_ms);
    let digit_class = if props.at_target { "digits accent" } else { "digits" };

    html! {
        <div class="time-display">
            <span class={digit_class}>{ format!("{:02}", parts.minutes) }</span>
            <span class="separator">{ ":" }</span>
            <span class={digit_class}>{ format!("{:02}", parts.seconds) }</span>
            <span class="separator">{ "." }</span>
            <span class="centiseconds">{ format!("{:02}", parts.centiseconds) }</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ControlsProps {
    pub running: bool,
    pub on_toggle: Callback<MouseEvent>,
    pub on_reset: Callback<MouseEvent>,
}

#[function_component(Controls)]
pub fn controls(props: &ControlsProps) -> Html {
    html! {
        <div class="controls">
            <button class="btn-primary" onclick={props.on_toggle.clone()}>
                { if props.running { "Pause" } else { "Start" } }
            </button>
            <button class="btn-secondary" onclick={props.on_reset.clone()}>
                { "Reset" }
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DurationFieldProps {
    pub text: String,
    pub error: Option<String>,
    pub min: u32,
    pub max: u32,
    pub oninput: Callback<InputEvent>,
    pub onchange: Callback<Event>,
    pub onkeydown: Callback<KeyboardEvent>,
}

/// Target duration input in whole minutes.
#[function_component(DurationField)]
pub fn duration_field(props: &DurationFieldProps) -> Html {
    html! {
        <div class="form-group">
            <label for="target_minutes_input">{ "Target (minutes):" }</label>
            <input
                type="number"
                id="target_minutes_input"
                step="1"
                min={props.min.to_string()}
                max={props.max.to_string()}
                value={props.text.clone()}
                class={if props.error.is_some() { "invalid" } else { "" }}
                oninput={props.oninput.clone()}
                onchange={props.onchange.clone()}
                onkeydown={props.onkeydown.clone()}
            />
            if let Some(ref err) = props.error {
                <div class="input-error">{ err }</div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TargetIndicatorProps {
    pub target_minutes: u32,
}

#[function_component(TargetIndicator)]
pub fn target_indicator(props: &TargetIndicatorProps) -> Html {
    html! {
        <div class="target-indicator">
            { format!("Target: {:02}:00 minutes", props.target_minutes) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_message_names_the_target() {
        assert_eq!(reached_message(NotifyPolicy::Once, 10, 1), "10 minutes reached!");
    }

    #[test]
    fn repeating_message_names_the_multiple() {
        assert_eq!(
            reached_message(NotifyPolicy::EveryMultiple, 10, 1),
            "10 minutes reached!"
        );
        assert_eq!(
            reached_message(NotifyPolicy::EveryMultiple, 5, 3),
            "3× target reached (15 minutes)"
        );
    }
}
