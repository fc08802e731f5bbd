// src/components/contact_form.rs
use gloo::timers::callback::Timeout;
use web_sys::HtmlFormElement;
use yew::prelude::*;

const SEND_DELAY_MS: u32 = 800;

#[derive(Clone, Copy, PartialEq)]
enum FormStatus {
    Idle,
    Sending,
    Sent,
}

/// Placeholder contact form: nothing leaves the browser.
#[function_component(ContactForm)]
pub fn contact_form() -> Html {
    let status = use_state(|| FormStatus::Idle);
    let form_ref = use_node_ref();
    // Dropping the pending timeout on unmount cancels it.
    let pending = use_mut_ref(|| None::<Timeout>);

    let onsubmit = {
        let status = status.clone();
        let form_ref = form_ref.clone();
        let pending = pending.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            status.set(FormStatus::Sending);

            let status = status.clone();
            let form_ref = form_ref.clone();
            *pending.borrow_mut() = Some(Timeout::new(SEND_DELAY_MS, move || {
                status.set(FormStatus::Sent);
                match form_ref.cast::<HtmlFormElement>() {
                    Some(form) => form.reset(),
                    None => log::warn!("Contact form element missing"),
                }
            }));
        })
    };

    let (status_text, status_class) = match *status {
        FormStatus::Idle => ("", "form-status"),
        FormStatus::Sending => ("Sending...", "form-status"),
        FormStatus::Sent => ("Message sent! We'll reply soon.", "form-status success"),
    };

    html! {
        <form id="contact-form" class="contact-form" ref={form_ref} {onsubmit}>
            <label for="contact-name">{"Name"}</label>
            <input id="contact-name" name="name" type="text" required={true} />
            <label for="contact-email">{"Email"}</label>
            <input id="contact-email" name="email" type="email" required={true} />
            <label for="contact-message">{"Message"}</label>
            <textarea id="contact-message" name="message" rows="5" required={true}></textarea>
            <button class="btn btn-primary" type="submit" disabled={*status == FormStatus::Sending}>
                {"Send"}
            </button>
            <p id="form-status" class={status_class} aria-live="polite">{status_text}</p>
        </form>
    }
}
