use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static MOBILE_UA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini")
        .expect("mobile ua regex")
});

/// Mobile user agents get the native app URI scheme; everyone else the
/// web URL.
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    MOBILE_UA_RE.is_match(user_agent)
}

/// Builds the WhatsApp deep link carrying the summary message to the
/// agency's fixed number.
pub fn build_whatsapp_link(phone_number: &str, message: &str, user_agent: &str) -> String {
    let base = if is_mobile_user_agent(user_agent) {
        "whatsapp://send"
    } else {
        "https://api.whatsapp.com/send"
    };
    let mut url = Url::parse(base).expect("static base url");
    url.query_pairs_mut()
        .append_pair("phone", phone_number)
        .append_pair("text", message);
    url.to_string()
}
