//! Prompt stylesheet generation.
//!
//! The sheet is generated from the active theme color and injected once per mount; every rule
//! is scoped under the `wtd-` class prefix so host-page styles stay untouched.

/// DOM id of the injected style element.
pub const STYLE_ELEMENT_ID: &str = "web-to-desktop-styles";

const THEME_TOKEN: &str = "@theme@";
const THEME_DARK_TOKEN: &str = "@theme-dark@";

/// Renders the scoped stylesheet for `theme_color`.
pub fn stylesheet(theme_color: &str) -> String {
    CSS_TEMPLATE
        .replace(THEME_DARK_TOKEN, &adjust_color(theme_color, -20))
        .replace(THEME_TOKEN, theme_color)
}

/// Lightens (positive percent) or darkens (negative) a `#rrggbb` color.
///
/// Malformed input comes straight from caller configuration; it is returned unchanged rather
/// than guessed at.
pub fn adjust_color(color: &str, percent: i32) -> String {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 {
        return color.to_string();
    }
    let Ok(channels) = (0..3)
        .map(|i| u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16))
        .collect::<Result<Vec<_>, _>>()
    else {
        return color.to_string();
    };

    let adjusted: Vec<u8> = channels
        .into_iter()
        .map(|channel| {
            let scaled = f64::from(channel) * (1.0 + f64::from(percent) / 100.0);
            scaled.clamp(0.0, 255.0).round() as u8
        })
        .collect();
    format!("#{:02x}{:02x}{:02x}", adjusted[0], adjusted[1], adjusted[2])
}

const CSS_TEMPLATE: &str = r#"
.wtd-container {
  position: fixed;
  bottom: 20px;
  right: 20px;
  z-index: 999999;
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
  font-size: 14px;
  line-height: 1.5;
  color: #1f2937;
  box-sizing: border-box;
}

.wtd-container *,
.wtd-container *::before,
.wtd-container *::after {
  box-sizing: inherit;
}

.wtd-card {
  position: relative;
  background: rgba(255, 255, 255, 0.95);
  backdrop-filter: blur(20px);
  -webkit-backdrop-filter: blur(20px);
  border-radius: 16px;
  box-shadow: 0 25px 50px -12px rgba(0, 0, 0, 0.25),
              0 0 0 1px rgba(255, 255, 255, 0.1);
  padding: 20px;
  min-width: 320px;
  max-width: 380px;
  animation: wtd-slide-up 0.4s cubic-bezier(0.16, 1, 0.3, 1);
  transform-origin: bottom right;
}

@keyframes wtd-slide-up {
  from {
    opacity: 0;
    transform: translateY(20px) scale(0.95);
  }
  to {
    opacity: 1;
    transform: translateY(0) scale(1);
  }
}

.wtd-close {
  position: absolute;
  top: 12px;
  right: 12px;
  width: 28px;
  height: 28px;
  border: none;
  background: rgba(0, 0, 0, 0.05);
  border-radius: 50%;
  cursor: pointer;
  display: flex;
  align-items: center;
  justify-content: center;
  color: #6b7280;
  transition: all 0.2s ease;
  padding: 0;
}

.wtd-close:hover {
  background: rgba(0, 0, 0, 0.1);
  color: #374151;
}

.wtd-close svg {
  width: 14px;
  height: 14px;
}

.wtd-header {
  display: flex;
  align-items: center;
  gap: 14px;
  margin-bottom: 16px;
  padding-right: 20px;
}

.wtd-icon {
  width: 52px;
  height: 52px;
  border-radius: 12px;
  object-fit: cover;
  box-shadow: 0 4px 6px -1px rgba(0, 0, 0, 0.1);
  flex-shrink: 0;
}

.wtd-title-wrap {
  flex: 1;
  min-width: 0;
}

.wtd-title {
  font-size: 16px;
  font-weight: 600;
  color: #111827;
  margin: 0 0 4px 0;
  white-space: nowrap;
  overflow: hidden;
  text-overflow: ellipsis;
}

.wtd-app-name {
  font-size: 13px;
  color: #6b7280;
  margin: 0;
  white-space: nowrap;
  overflow: hidden;
  text-overflow: ellipsis;
}

.wtd-description {
  color: #4b5563;
  font-size: 13px;
  margin-bottom: 18px;
  line-height: 1.6;
}

.wtd-buttons {
  display: flex;
  gap: 10px;
}

.wtd-btn {
  flex: 1;
  padding: 12px 16px;
  border-radius: 10px;
  font-size: 14px;
  font-weight: 500;
  cursor: pointer;
  transition: all 0.2s ease;
  border: none;
  display: flex;
  align-items: center;
  justify-content: center;
  gap: 6px;
}

.wtd-btn-primary {
  background: linear-gradient(135deg, @theme@ 0%, @theme-dark@ 100%);
  color: white;
  box-shadow: 0 4px 14px 0 @theme@40;
}

.wtd-btn-primary:hover {
  transform: translateY(-1px);
  box-shadow: 0 6px 20px 0 @theme@50;
}

.wtd-btn-primary:active {
  transform: translateY(0);
}

.wtd-btn-secondary {
  background: #f3f4f6;
  color: #4b5563;
}

.wtd-btn-secondary:hover {
  background: #e5e7eb;
}

.wtd-btn svg {
  width: 16px;
  height: 16px;
}

.wtd-guide {
  margin-top: 16px;
  padding: 16px;
  background: linear-gradient(135deg, #f8fafc 0%, #f1f5f9 100%);
  border-radius: 12px;
  border: 1px solid #e2e8f0;
}

.wtd-steps {
  list-style: none;
  padding: 0;
  margin: 0;
}

.wtd-step {
  display: flex;
  align-items: flex-start;
  gap: 12px;
  padding: 8px 0;
  font-size: 13px;
  color: #475569;
}

.wtd-step:not(:last-child) {
  border-bottom: 1px dashed #e2e8f0;
}

.wtd-step-num {
  width: 22px;
  height: 22px;
  border-radius: 50%;
  background: @theme@;
  color: white;
  display: flex;
  align-items: center;
  justify-content: center;
  font-size: 12px;
  font-weight: 600;
  flex-shrink: 0;
}

.wtd-step-text {
  padding-top: 2px;
}

.wtd-success {
  text-align: center;
  padding: 10px 0;
}

.wtd-success-icon {
  width: 56px;
  height: 56px;
  margin: 0 auto 16px;
  background: linear-gradient(135deg, #10b981 0%, #059669 100%);
  border-radius: 50%;
  display: flex;
  align-items: center;
  justify-content: center;
  animation: wtd-success-pop 0.4s cubic-bezier(0.16, 1, 0.3, 1);
}

@keyframes wtd-success-pop {
  0% {
    transform: scale(0);
  }
  50% {
    transform: scale(1.1);
  }
  100% {
    transform: scale(1);
  }
}

.wtd-success-icon svg {
  width: 28px;
  height: 28px;
  color: white;
}

.wtd-success-title {
  font-size: 16px;
  font-weight: 600;
  color: #111827;
  margin: 0 0 6px 0;
}

.wtd-success-desc {
  font-size: 13px;
  color: #6b7280;
  margin: 0;
}

.wtd-installing {
  text-align: center;
  padding: 20px 0;
}

.wtd-installing-spinner {
  width: 48px;
  height: 48px;
  margin: 0 auto 16px;
  color: @theme@;
}

.wtd-installing-spinner svg {
  width: 48px;
  height: 48px;
  animation: wtd-spin 1s linear infinite;
}

@keyframes wtd-spin {
  from {
    transform: rotate(0deg);
  }
  to {
    transform: rotate(360deg);
  }
}

.wtd-installing-text {
  font-size: 14px;
  color: #6b7280;
  margin: 0;
}

@media (max-width: 480px) {
  .wtd-container {
    bottom: 16px;
    right: 16px;
    left: 16px;
  }

  .wtd-card {
    min-width: auto;
    max-width: none;
    width: 100%;
  }
}

@media (prefers-color-scheme: dark) {
  .wtd-card {
    background: rgba(30, 30, 30, 0.95);
    border: 1px solid rgba(255, 255, 255, 0.1);
  }

  .wtd-title {
    color: #f9fafb;
  }

  .wtd-app-name {
    color: #9ca3af;
  }

  .wtd-description {
    color: #d1d5db;
  }

  .wtd-close {
    background: rgba(255, 255, 255, 0.1);
    color: #9ca3af;
  }

  .wtd-close:hover {
    background: rgba(255, 255, 255, 0.15);
    color: #e5e7eb;
  }

  .wtd-btn-secondary {
    background: rgba(255, 255, 255, 0.1);
    color: #d1d5db;
  }

  .wtd-btn-secondary:hover {
    background: rgba(255, 255, 255, 0.15);
  }

  .wtd-guide {
    background: linear-gradient(135deg, rgba(30, 41, 59, 0.8) 0%, rgba(15, 23, 42, 0.8) 100%);
    border-color: rgba(255, 255, 255, 0.1);
  }

  .wtd-step {
    color: #cbd5e1;
    border-color: rgba(255, 255, 255, 0.1);
  }

  .wtd-success-title {
    color: #f9fafb;
  }

  .wtd-success-desc {
    color: #9ca3af;
  }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_color_scales_each_channel() {
        assert_eq!(adjust_color("#000000", 40), "#000000");
        assert_eq!(adjust_color("#ffffff", -100), "#000000");
        assert_eq!(adjust_color("#640000", -50), "#320000");
        assert_eq!(adjust_color("#c8c8c8", 100), "#ffffff");
    }

    #[test]
    fn adjust_color_leaves_malformed_input_alone() {
        assert_eq!(adjust_color("tomato", -20), "tomato");
        assert_eq!(adjust_color("#fff", 10), "#fff");
        assert_eq!(adjust_color("#zzzzzz", 10), "#zzzzzz");
    }

    #[test]
    fn stylesheet_substitutes_both_theme_tokens() {
        let css = stylesheet("#4f46e5");
        assert!(css.contains("#4f46e5"));
        assert!(css.contains(&adjust_color("#4f46e5", -20)));
        assert!(!css.contains("@theme@"));
        assert!(!css.contains("@theme-dark@"));
    }
}
