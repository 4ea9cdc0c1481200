use std::time::{Duration, Instant};

use once_cell::sync::Lazy;

static PROFILE_ENABLED: Lazy<bool> = Lazy::new(|| {
    matches!(
        std::env::var("DEFNAME_PROFILE").ok().as_deref(),
        Some("1") | Some("true") | Some("TRUE") | Some("yes") | Some("YES")
    )
});

pub fn enabled() -> bool {
    *PROFILE_ENABLED
}

pub struct ProfileSpan {
    name: &'static str,
    start: Instant,
}

impl ProfileSpan {
    pub fn new(name: &'static str) -> Option<Self> {
        enabled().then(|| Self {
            name,
            start: Instant::now(),
        })
    }
}

impl Drop for ProfileSpan {
    fn drop(&mut self) {
        if !enabled() {
            return;
        }
        let pretty_elapsed = format_duration(self.start.elapsed());
        eprintln!(
            "[defname-profile] {name} took {pretty_elapsed}",
            name = self.name
        );
    }
}

pub fn span(name: &'static str) -> Option<ProfileSpan> {
    ProfileSpan::new(name)
}

pub fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();
    match micros {
        0..=999 => format!("{micros}µs"),
        1_000..=999_999 => format!("{:.1}ms", micros as f64 / 1_000.0),
        _ => format!("{:.2}s", duration.as_secs_f64()),
    }
}
