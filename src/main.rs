//! Target stopwatch application using Yew.
//! Wires the timekeeper, ticking, audio cue and view components.

use gloo_timers::callback::Timeout;
use log::{info, warn};
use std::cell::RefCell;
use std::rc::Rc;
use target_stopwatch::{
    config::{
        LOG_LEVEL, MAX_TARGET_MINUTES, MESSAGE_CLEAR_MS, MIN_TARGET_MINUTES, OPTIONS_ATTRIBUTE,
        ROOT_ELEMENT_ID, TICK_MS,
    },
    now_ms,
    utils::parse_target_minutes,
    Notification, StopwatchOptions, Timekeeper,
};
use yew::prelude::*;

mod audio;
mod components;
mod hooks;

use audio::Beeper;
use components::{reached_message, Controls, DurationField, TargetIndicator, TimeDisplay};
use hooks::{use_ticker, use_validated_input};

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Arm the banner auto-clear, replacing (and so cancelling) any pending one.
fn schedule_message_clear(
    slot: &RefCell<Option<Timeout>>,
    generation: u64,
    timekeeper: Rc<RefCell<Timekeeper>>,
    force_update: UseForceUpdateHandle,
) {
    let handle = Timeout::new(MESSAGE_CLEAR_MS, move || {
        if timekeeper.borrow_mut().clear_message(generation) {
            force_update.force_update();
        }
    });
    *slot.borrow_mut() = Some(handle);
}

// ──────────────────────────────────────────────────────────────────────────────

#[derive(Properties, PartialEq)]
pub struct StopwatchProps {
    #[prop_or_default]
    pub options: StopwatchOptions,
}

/// Root component: one stopwatch panel.
#[function_component(Stopwatch)]
fn stopwatch(props: &StopwatchProps) -> Html {
    let timekeeper = {
        let options = props.options.clone();
        use_mut_ref(move || {
            Timekeeper::from_options(&options).unwrap_or_else(|e| {
                warn!("{}; falling back to the default target", e);
                Timekeeper::new(options.notify_policy, options.tick_strategy)
            })
        })
    };
    let force_update = use_force_update();
    let beeper = use_mut_ref(Beeper::new);
    // Pending banner clear; dropping it cancels the timeout.
    let message_clear = use_mut_ref(|| None::<Timeout>);
    let last_notification = use_mut_ref(|| None::<Notification>);
    let settings_visible = use_state(|| props.options.show_duration_field);

    let (running, elapsed_ms, at_target, target_minutes, message_visible, policy) = {
        let tk = timekeeper.borrow();
        (
            tk.is_running(),
            tk.elapsed_ms(),
            tk.at_target(),
            tk.target_minutes(),
            tk.message_visible(),
            tk.policy(),
        )
    };

    let on_tick = {
        let timekeeper = timekeeper.clone();
        let force_update = force_update.clone();
        let beeper = beeper.clone();
        let message_clear = message_clear.clone();
        let last_notification = last_notification.clone();
        Callback::from(move |_| {
            let fired = timekeeper.borrow_mut().tick(now_ms());
            if let Some(notification) = fired {
                beeper.borrow().play();
                *last_notification.borrow_mut() = Some(notification);
                schedule_message_clear(
                    &message_clear,
                    notification.generation,
                    timekeeper.clone(),
                    force_update.clone(),
                );
            }
            force_update.force_update();
        })
    };
    use_ticker(running, TICK_MS, on_tick);

    let duration = {
        let timekeeper = timekeeper.clone();
        let force_update = force_update.clone();
        let on_valid = Callback::from(move |minutes: u32| {
            if let Err(e) = timekeeper.borrow_mut().set_target_minutes(minutes) {
                warn!("Target rejected: {}", e);
            }
            force_update.force_update();
        });
        use_validated_input(
            target_minutes,
            Rc::new(|raw: &str| parse_target_minutes(raw).map_err(|e| e.to_string())),
            on_valid,
        )
    };

    let on_toggle = {
        let timekeeper = timekeeper.clone();
        let force_update = force_update.clone();
        Callback::from(move |_: MouseEvent| {
            timekeeper.borrow_mut().toggle(now_ms());
            force_update.force_update();
        })
    };

    let on_reset = {
        let timekeeper = timekeeper.clone();
        let force_update = force_update.clone();
        let message_clear = message_clear.clone();
        let last_notification = last_notification.clone();
        let set_duration_text = duration.set_value.clone();
        Callback::from(move |_: MouseEvent| {
            timekeeper.borrow_mut().reset();
            message_clear.borrow_mut().take();
            last_notification.borrow_mut().take();
            // Drop any rejected text and show the target that is actually in force.
            set_duration_text.emit(timekeeper.borrow().target_minutes());
            force_update.force_update();
        })
    };

    let toggle_settings = {
        let settings_visible = settings_visible.clone();
        Callback::from(move |_: MouseEvent| settings_visible.set(!*settings_visible))
    };

    let banner = message_visible
        .then(|| *last_notification.borrow())
        .flatten()
        .map(|n| reached_message(policy, n.target_minutes, n.multiple));

    let panel_class = classes!(
        "stopwatch-panel",
        running.then_some("running"),
        at_target.then_some("at-target"),
    );

    html! {
        <div class="stopwatch-page">
            <div class={panel_class}>
                <TimeDisplay elapsed_ms={elapsed_ms} at_target={at_target} />

                if let Some(text) = banner {
                    <p class="reached-message">{ text }</p>
                }

                <Controls running={running} on_toggle={on_toggle} on_reset={on_reset} />

                <div class="settings-header">
                    <button class="btn-secondary small"
                        aria-expanded={(*settings_visible).to_string()}
                        onclick={toggle_settings}
                    >
                        { if *settings_visible { "Hide duration" } else { "Set duration" } }
                    </button>
                </div>

                if *settings_visible {
                    <DurationField
                        text={duration.text.clone()}
                        error={duration.error.clone()}
                        min={MIN_TARGET_MINUTES}
                        max={MAX_TARGET_MINUTES}
                        oninput={duration.on_text_input.clone()}
                        onchange={duration.on_commit.reform(|_: Event| ())}
                        onkeydown={duration.on_keydown.clone()}
                    />
                }

                <TargetIndicator target_minutes={target_minutes} />
            </div>
        </div>
    }
}

/// Read mount options from the host element, if the page provides one.
fn read_host_options(root: Option<&web_sys::Element>) -> StopwatchOptions {
    let raw = root.and_then(|el| el.get_attribute(OPTIONS_ATTRIBUTE));
    StopwatchOptions::from_attribute(raw.as_deref())
}

/// Entry point: mounts the stopwatch on `#stopwatch`, or on `<body>` if absent.
fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(LOG_LEVEL));

    let root = gloo_utils::document().get_element_by_id(ROOT_ELEMENT_ID);
    let props = StopwatchProps {
        options: read_host_options(root.as_ref()),
    };
    info!("Mounting stopwatch with {:?}", props.options);

    match root {
        Some(root) => {
            yew::Renderer::<Stopwatch>::with_root_and_props(root, props).render();
        }
        None => {
            yew::Renderer::<Stopwatch>::with_props(props).render();
        }
    }
}
