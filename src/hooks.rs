use gloo_timers::callback::Interval;
use std::rc::Rc;
use target_stopwatch::TickSlot;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Holds the state and callbacks for a validated input field.
#[derive(Clone)]
pub struct ValidatedInput<T: 'static> {
    /// The current text content of the input field.
    pub text: String,
    /// Validation message for the last rejected commit, if any.
    pub error: Option<String>,
    /// Callback for the text input's `oninput` event. Updates the internal text state.
    pub on_text_input: Callback<InputEvent>,
    /// Parse and validate the current text. Bound to `onchange` and Enter.
    pub on_commit: Callback<()>,
    /// Enter-key handler that forwards to `on_commit`.
    pub on_keydown: Callback<KeyboardEvent>,
    /// Programmatically set the value, resetting the text and clearing errors.
    pub set_value: Callback<T>,
}

/// Custom hook to manage state for a validated input field.
///
/// `on_valid` is emitted with each value that passes `parse_and_validate`.
/// Rejected text never reaches it; the previous value is retained.
#[hook]
pub fn use_validated_input<T: std::fmt::Display + 'static>(
    initial_value: T,
    parse_and_validate: Rc<dyn Fn(&str) -> Result<T, String>>,
    on_valid: Callback<T>,
) -> ValidatedInput<T> {
    let text_state_handle: UseStateHandle<String> = use_state(|| initial_value.to_string());
    let error_state_handle: UseStateHandle<Option<String>> = use_state(|| None::<String>);

    let on_text_input = {
        let text_setter = text_state_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    let on_commit = {
        let current_text_handle = text_state_handle.clone();
        let text_setter_on_commit = text_state_handle.clone();
        let error_setter = error_state_handle.clone();
        let parse_fn = parse_and_validate.clone();

        Callback::from(move |_| match parse_fn(current_text_handle.as_str()) {
            Ok(parsed_val) => {
                text_setter_on_commit.set(parsed_val.to_string()); // canonical form
                error_setter.set(None);
                on_valid.emit(parsed_val);
            }
            Err(err_msg) => {
                error_setter.set(Some(err_msg));
            }
        })
    };

    let on_keydown = {
        let commit_handler = on_commit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                commit_handler.emit(());
            }
        })
    };

    let set_value = {
        let text_setter = text_state_handle.clone();
        let error_setter = error_state_handle.clone();
        Callback::from(move |new_val: T| {
            text_setter.set(new_val.to_string());
            error_setter.set(None);
        })
    };

    ValidatedInput {
        text: (*text_state_handle).clone(),
        error: (*error_state_handle).clone(),
        on_text_input,
        on_commit,
        on_keydown,
        set_value,
    }
}

/// Run `on_tick` every `period_ms` while `active` is true.
///
/// The interval is created when `active` becomes true and dropped (which
/// cancels it) when `active` becomes false or the component unmounts.
#[hook]
pub fn use_ticker(active: bool, period_ms: u32, on_tick: Callback<()>) {
    let slot = use_mut_ref(TickSlot::<Interval>::default);
    use_effect_with(active, move |&active| {
        slot.borrow_mut()
            .sync(active, move || Interval::new(period_ms, move || on_tick.emit(())));
        move || slot.borrow_mut().release()
    });
}
