use chrono::NaiveDate;

/// Converts a picker date ("dd/mm/yyyy") to the CRM's "yyyy-mm-dd" form.
///
/// Pure string surgery: the components are split, checked as a real
/// calendar date and reassembled zero-padded. No timestamp type is ever
/// involved, so the result cannot shift by a day under any local
/// timezone. Malformed input returns `None` and logs a diagnostic; the
/// caller degrades the property to null instead of failing the
/// submission.
pub fn to_iso_date(input: &str) -> Option<String> {
    let parts: Vec<&str> = input.split('/').collect();
    if parts.len() != 3 {
        tracing::warn!(input, "date has wrong number of components, dropping");
        return None;
    }
    let day: u32 = match parts[0].trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(input, "non-numeric day component, dropping");
            return None;
        }
    };
    let month: u32 = match parts[1].trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(input, "non-numeric month component, dropping");
            return None;
        }
    };
    let year: i32 = match parts[2].trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(input, "non-numeric year component, dropping");
            return None;
        }
    };

    // NaiveDate is timezone-free; this only rejects impossible dates.
    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        tracing::warn!(input, "not a calendar date, dropping");
        return None;
    }

    Some(format!("{:04}-{:02}-{:02}", year, month, day))
}
