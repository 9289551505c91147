use scraper::{ElementRef, Html, Selector};

fn selector(text: &str) -> Selector {
    Selector::parse(text).expect("invalid selector")
}

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&selector("form"))
        .next()
        .expect("no form found")
}

/// Check that `form` submits to `endpoint` with the HTMX `attribute`, e.g. "hx-post".
#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let got = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(got, endpoint, "want {attribute}=\"{endpoint}\", got {got:?}");
}

#[track_caller]
fn must_get_input<'a>(form: &ElementRef<'a>, name: &str) -> ElementRef<'a> {
    form.select(&selector(&format!("input[name=\"{name}\"]")))
        .next()
        .unwrap_or_else(|| panic!("no input found with name \"{name}\""))
}

/// Check that `form` has an input called `name` of type `type_`, and whether
/// it is required.
#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str, required: bool) {
    let input = must_get_input(form, name);
    let got_type = input.value().attr("type").unwrap_or_default();

    assert_eq!(got_type, type_, "want input {name} with type \"{type_}\"");
    assert_eq!(
        input.value().attr("required").is_some(),
        required,
        "want input {name} to have required={required}"
    );
}

#[track_caller]
pub(crate) fn assert_form_input_with_value(form: &ElementRef<'_>, name: &str, value: &str) {
    let input = must_get_input(form, name);
    let got_value = input.value().attr("value").unwrap_or_default();

    assert_eq!(got_value, value, "want input {name} with value \"{value}\"");
}

/// Check that the form has a submit button labelled `text`.
#[track_caller]
pub(crate) fn assert_form_submit_button(form: &ElementRef<'_>, text: &str) {
    let button = form
        .select(&selector("button[type=\"submit\"]"))
        .next()
        .expect("no submit button found");
    let got_text = button.text().collect::<String>();

    assert_eq!(got_text.trim(), text);
}

/// Check that the form shows exactly `want` as its first validation message.
#[track_caller]
pub(crate) fn assert_form_error_message(form: &ElementRef<'_>, want: &str) {
    let message = form
        .select(&selector("p.text-red-600"))
        .next()
        .expect("no error message found")
        .text()
        .collect::<String>();

    assert_eq!(message.trim(), want);
}

/// The `(value, text, selected)` of each option in the select called `name`.
#[track_caller]
pub(crate) fn select_options(form: &ElementRef<'_>, name: &str) -> Vec<(String, String, bool)> {
    let select = form
        .select(&selector(&format!("select[name=\"{name}\"]")))
        .next()
        .unwrap_or_else(|| panic!("no select found with name \"{name}\""));

    select
        .select(&selector("option"))
        .map(|option| {
            (
                option.value().attr("value").unwrap_or_default().to_owned(),
                option.text().collect::<String>().trim().to_owned(),
                option.value().attr("selected").is_some(),
            )
        })
        .collect()
}
