/// Pickup/return times are offered on a 30-minute grid, "00:00".."23:30".
pub fn time_grid() -> Vec<String> {
    let mut times = Vec::with_capacity(48);
    for h in 0..24 {
        for m in [0, 30] {
            times.push(format!("{:02}:{:02}", h, m));
        }
    }
    times
}

/// True when `value` is an "HH:MM" string on the 30-minute grid.
pub fn is_on_grid(value: &str) -> bool {
    let Some((hours, minutes)) = value.split_once(':') else {
        return false;
    };
    if hours.len() != 2 || minutes.len() != 2 {
        return false;
    }
    let (Ok(h), Ok(m)) = (hours.parse::<u8>(), minutes.parse::<u8>()) else {
        return false;
    };
    h < 24 && (m == 0 || m == 30)
}
