pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

/// Local, human readable form of a server timestamp; falls back to the raw
/// string when it does not parse.
pub(crate) fn format_local_datetime(date: &str) -> String {
    let d = js_sys::Date::new(&date.into());
    if d.get_time().is_nan() {
        return date.to_string();
    }
    String::from(d.to_locale_string("zh-CN", &wasm_bindgen::JsValue::UNDEFINED))
}
