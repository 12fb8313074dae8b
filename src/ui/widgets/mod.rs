//! Small reusable widgets

mod badge;
mod modal;
mod progress;

pub use badge::{badge_style, status_badge};
pub use modal::{centered_rect, Modal};
pub use progress::ProgressBar;

/// Cut `value` to `max` characters, marking the cut with an ellipsis
pub fn truncate_str(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    if max == 0 {
        return String::new();
    }
    value.chars().take(max - 1).collect::<String>() + "…"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Rua A", 10), "Rua A");
        assert_eq!(truncate_str("Avenida Paulista", 8), "Avenida…");
        assert_eq!(truncate_str("São João", 4), "São…");
        assert_eq!(truncate_str("abc", 0), "");
    }
}
