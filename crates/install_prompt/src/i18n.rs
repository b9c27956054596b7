//! Localization resolver: built-in text bundles, caller overrides, and the fallback chain.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Complete text bundle for one locale.
///
/// Field names serialize to the JS-facing spelling so bundles and overrides round-trip across
/// the wasm boundary unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBundle {
    /// Interactive card title.
    pub title: String,
    /// Interactive and guided card description.
    pub description: String,
    /// Install button label.
    pub install_button: String,
    /// Dismiss button label.
    pub dismiss_button: String,
    /// Installing placeholder status line.
    pub installing: String,
    /// Installing placeholder hint.
    pub installing_description: String,
    /// Guided card title.
    pub ios_title: String,
    /// First guided instruction step.
    pub ios_step1: String,
    /// Second guided instruction step.
    pub ios_step2: String,
    /// Third guided instruction step.
    pub ios_step3: String,
    /// Success card title.
    pub installed_title: String,
    /// Success card description.
    pub installed_description: String,
}

/// Partial text bundle; `Some` fields replace the matching built-in string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextBundlePatch {
    /// Interactive card title.
    pub title: Option<String>,
    /// Interactive and guided card description.
    pub description: Option<String>,
    /// Install button label.
    pub install_button: Option<String>,
    /// Dismiss button label.
    pub dismiss_button: Option<String>,
    /// Installing placeholder status line.
    pub installing: Option<String>,
    /// Installing placeholder hint.
    pub installing_description: Option<String>,
    /// Guided card title.
    pub ios_title: Option<String>,
    /// First guided instruction step.
    pub ios_step1: Option<String>,
    /// Second guided instruction step.
    pub ios_step2: Option<String>,
    /// Third guided instruction step.
    pub ios_step3: Option<String>,
    /// Success card title.
    pub installed_title: Option<String>,
    /// Success card description.
    pub installed_description: Option<String>,
}

/// Caller text overrides keyed by locale tag.
pub type LocaleOverrides = BTreeMap<String, TextBundlePatch>;

impl TextBundle {
    /// Applies a partial override, replacing only the patched strings.
    pub fn merged_with(&self, patch: &TextBundlePatch) -> Self {
        let mut merged = self.clone();
        let fields = [
            (&mut merged.title, &patch.title),
            (&mut merged.description, &patch.description),
            (&mut merged.install_button, &patch.install_button),
            (&mut merged.dismiss_button, &patch.dismiss_button),
            (&mut merged.installing, &patch.installing),
            (&mut merged.installing_description, &patch.installing_description),
            (&mut merged.ios_title, &patch.ios_title),
            (&mut merged.ios_step1, &patch.ios_step1),
            (&mut merged.ios_step2, &patch.ios_step2),
            (&mut merged.ios_step3, &patch.ios_step3),
            (&mut merged.installed_title, &patch.installed_title),
            (&mut merged.installed_description, &patch.installed_description),
        ];
        for (slot, replacement) in fields {
            if let Some(replacement) = replacement {
                *slot = replacement.clone();
            }
        }
        merged
    }
}

/// Locale tags with a built-in bundle, in fallback-scan order.
pub const BUILT_IN_LOCALES: [&str; 5] = ["zh-CN", "zh-TW", "en", "ja", "ko"];

fn bundle(strings: [&str; 12]) -> TextBundle {
    let [title, description, install_button, dismiss_button, installing, installing_description, ios_title, ios_step1, ios_step2, ios_step3, installed_title, installed_description] =
        strings.map(str::to_string);
    TextBundle {
        title,
        description,
        install_button,
        dismiss_button,
        installing,
        installing_description,
        ios_title,
        ios_step1,
        ios_step2,
        ios_step3,
        installed_title,
        installed_description,
    }
}

/// Returns the built-in bundle for an exact locale tag.
pub fn built_in(locale: &str) -> Option<TextBundle> {
    let strings = match locale {
        "zh-CN" => [
            "安装桌面应用",
            "将此网站安装为桌面应用，享受更快捷的访问体验",
            "立即安装",
            "暂不安装",
            "正在安装桌面程序",
            "请在浏览器弹窗中点击\"安装\"确认",
            "添加到主屏幕",
            "点击底部的 \"分享\" 按钮",
            "选择 \"添加到主屏幕\"",
            "点击 \"添加\" 完成安装",
            "安装成功",
            "可从桌面启动应用了",
        ],
        "zh-TW" => [
            "安裝桌面應用",
            "將此網站安裝為桌面應用，享受更快捷的訪問體驗",
            "立即安裝",
            "暫不安裝",
            "正在安裝桌面程式",
            "請在瀏覽器彈窗中點擊「安裝」確認",
            "添加到主螢幕",
            "點擊底部的 \"分享\" 按鈕",
            "選擇 \"添加到主螢幕\"",
            "點擊 \"添加\" 完成安裝",
            "安裝成功",
            "可從桌面啟動應用了",
        ],
        "en" => [
            "Install Desktop App",
            "Install this website as a desktop app for a faster experience",
            "Install Now",
            "Not Now",
            "Installing Desktop App",
            "Please click \"Install\" in the browser popup",
            "Add to Home Screen",
            "Tap the \"Share\" button at the bottom",
            "Select \"Add to Home Screen\"",
            "Tap \"Add\" to complete installation",
            "Installation Complete",
            "You can now launch it from your desktop",
        ],
        "ja" => [
            "デスクトップアプリをインストール",
            "このウェブサイトをデスクトップアプリとしてインストールして、より快適にアクセスできます",
            "今すぐインストール",
            "後で",
            "デスクトップアプリをインストール中",
            "ブラウザのポップアップで「インストール」をクリックしてください",
            "ホーム画面に追加",
            "下部の「共有」ボタンをタップ",
            "「ホーム画面に追加」を選択",
            "「追加」をタップしてインストール完了",
            "インストール完了",
            "デスクトップから起動できます",
        ],
        "ko" => [
            "데스크톱 앱 설치",
            "이 웹사이트를 데스크톱 앱으로 설치하여 더 빠르게 접근하세요",
            "지금 설치",
            "나중에",
            "데스크톱 앱 설치 중",
            "브라우저 팝업에서 \"설치\"를 클릭하세요",
            "홈 화면에 추가",
            "하단의 \"공유\" 버튼을 탭하세요",
            "\"홈 화면에 추가\"를 선택하세요",
            "\"추가\"를 탭하여 설치 완료",
            "설치 완료",
            "데스크톱에서 시작할 수 있습니다",
        ],
        _ => return None,
    };
    Some(bundle(strings))
}

fn bundle_for(locale: &str, overrides: Option<&LocaleOverrides>) -> Option<TextBundle> {
    let patch = overrides.and_then(|map| map.get(locale));
    // An override for a locale with no built-in bundle merges over `en` rather than producing
    // a bundle with missing strings.
    let base = built_in(locale).or_else(|| patch.is_some().then(|| english()))?;
    Some(match patch {
        Some(patch) => base.merged_with(patch),
        None => base,
    })
}

/// The `en` bundle, the end of every fallback chain.
pub fn english() -> TextBundle {
    built_in("en").unwrap_or_else(|| bundle([""; 12]))
}

/// Resolves the text bundle for `language`, merging `overrides` over the built-ins.
///
/// Resolution order: exact locale tag, then the first known locale sharing the base language
/// prefix, then `en`.
pub fn resolve_texts(language: Option<&str>, overrides: Option<&LocaleOverrides>) -> TextBundle {
    let language = language.unwrap_or("en");

    if let Some(exact) = bundle_for(language, overrides) {
        return exact;
    }

    let base = language.split('-').next().unwrap_or(language);
    let known = BUILT_IN_LOCALES
        .iter()
        .copied()
        .chain(overrides.into_iter().flat_map(|map| map.keys().map(String::as_str)));
    for candidate in known {
        if candidate.starts_with(base) {
            if let Some(matched) = bundle_for(candidate, overrides) {
                return matched;
            }
        }
    }

    bundle_for("en", overrides).unwrap_or_else(english)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn overrides(locale: &str, patch: TextBundlePatch) -> LocaleOverrides {
        let mut map = LocaleOverrides::new();
        map.insert(locale.to_string(), patch);
        map
    }

    #[test]
    fn exact_locale_match_wins() {
        let texts = resolve_texts(Some("ja"), None);
        assert_eq!(texts.install_button, "今すぐインストール");
    }

    #[test]
    fn base_language_prefix_matches_a_regional_bundle() {
        let texts = resolve_texts(Some("zh"), None);
        assert_eq!(texts.title, "安装桌面应用");

        let texts = resolve_texts(Some("ko-KR"), None);
        assert_eq!(texts.dismiss_button, "나중에");
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let texts = resolve_texts(Some("fr-FR"), None);
        assert_eq!(texts.title, "Install Desktop App");
        assert_eq!(resolve_texts(None, None), english());
    }

    #[test]
    fn overrides_merge_over_the_built_in_bundle() {
        let custom = overrides(
            "en",
            TextBundlePatch {
                title: Some("Get the app".to_string()),
                ..Default::default()
            },
        );
        let texts = resolve_texts(Some("en"), Some(&custom));
        assert_eq!(texts.title, "Get the app");
        assert_eq!(texts.install_button, "Install Now");
    }

    #[test]
    fn override_for_an_unknown_locale_merges_over_english() {
        let custom = overrides(
            "fr",
            TextBundlePatch {
                install_button: Some("Installer".to_string()),
                ..Default::default()
            },
        );
        let texts = resolve_texts(Some("fr"), Some(&custom));
        assert_eq!(texts.install_button, "Installer");
        assert_eq!(texts.dismiss_button, "Not Now");
    }

    #[test]
    fn patch_deserializes_from_js_facing_keys() {
        let patch: TextBundlePatch =
            serde_json::from_str(r#"{"installButton":"Go","iosStep1":"Open the share sheet"}"#)
                .expect("parse patch");
        assert_eq!(patch.install_button.as_deref(), Some("Go"));
        assert_eq!(patch.ios_step1.as_deref(), Some("Open the share sheet"));
        assert_eq!(patch.title, None);
    }
}
