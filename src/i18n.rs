//! User-visible strings for the supported UI languages

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::state::GenerateError;

/// UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ja,
}

impl Locale {
    pub fn all() -> &'static [Locale] {
        &[Locale::En, Locale::Ja]
    }

    /// Language code as written in the config file
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ja => "ja",
        }
    }

    /// Name of the language in that language
    pub fn name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Ja => "日本語",
        }
    }

    pub fn strings(&self) -> &'static Strings {
        match self {
            Locale::En => &EN,
            Locale::Ja => &JA,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::all()
            .iter()
            .copied()
            .find(|locale| locale.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("Unknown locale: {} (expected en or ja)", s))
    }
}

/// Every string the UI shows
pub struct Strings {
    pub app_title: &'static str,
    pub subtitle: &'static str,

    pub tab_generator: &'static str,
    pub tab_settings: &'static str,
    pub about: &'static str,

    pub input_label: &'static str,
    pub input_hint: &'static str,
    pub generate: &'static str,
    pub generating: &'static str,
    pub clear: &'static str,
    pub download: &'static str,
    pub result_caption: &'static str,
    pub preview_alt: &'static str,

    pub error_input_required: &'static str,
    pub error_generation_failed: &'static str,
    pub error_busy: &'static str,

    pub status_ready: &'static str,
    pub status_generating: &'static str,
    pub status_generated: &'static str,
    pub status_failed: &'static str,
    pub status_saved: &'static str,
    pub status_save_failed: &'static str,

    pub feature_fast_title: &'static str,
    pub feature_fast_body: &'static str,
    pub feature_quality_title: &'static str,
    pub feature_quality_body: &'static str,
    pub feature_download_title: &'static str,
    pub feature_download_body: &'static str,

    pub settings_title: &'static str,
    pub appearance: &'static str,
    pub theme: &'static str,
    pub preview: &'static str,
    pub language: &'static str,
    pub saving: &'static str,
    pub file_name: &'static str,
    pub remember_directory: &'static str,
    pub forget_directory: &'static str,
    pub last_directory: &'static str,
    pub none: &'static str,
    pub close: &'static str,
}

impl Strings {
    /// Message shown in the inline error region
    pub fn error_message(&self, error: GenerateError) -> &'static str {
        match error {
            GenerateError::InputRequired => self.error_input_required,
            GenerateError::GenerationFailed => self.error_generation_failed,
            GenerateError::Busy => self.error_busy,
        }
    }
}

static EN: Strings = Strings {
    app_title: "QR Code Tool",
    subtitle: "Enter text or a URL to generate a QR code",

    tab_generator: "Generator",
    tab_settings: "Settings",
    about: "About",

    input_label: "Text or URL",
    input_hint: "Type the text to encode...",
    generate: "Generate QR Code",
    generating: "Generating...",
    clear: "Clear",
    download: "Download",
    result_caption: "Generated QR code",
    preview_alt: "QR code",

    error_input_required: "Please enter some text",
    error_generation_failed: "Failed to generate QR code",
    error_busy: "A QR code is already being generated",

    status_ready: "Ready",
    status_generating: "Generating QR code...",
    status_generated: "QR code ready",
    status_failed: "QR code generation failed",
    status_saved: "Saved to",
    status_save_failed: "Failed to save",

    feature_fast_title: "Fast",
    feature_fast_body: "Codes are generated locally in an instant",
    feature_quality_title: "Reliable",
    feature_quality_body: "Error-correction level M keeps codes readable",
    feature_download_title: "Easy download",
    feature_download_body: "Save the code as a PNG in one click",

    settings_title: "Settings",
    appearance: "Appearance",
    theme: "Theme:",
    preview: "Preview:",
    language: "Language:",
    saving: "Saving",
    file_name: "Default file name:",
    remember_directory: "Remember the last save folder",
    forget_directory: "Forget",
    last_directory: "Last folder:",
    none: "None",
    close: "Close",
};

static JA: Strings = Strings {
    app_title: "QRコード生成",
    subtitle: "テキストやURLを入力してQRコードを生成",

    tab_generator: "生成",
    tab_settings: "設定",
    about: "情報",

    input_label: "テキストまたはURL",
    input_hint: "QRコードにしたいテキストを入力...",
    generate: "QRコード生成",
    generating: "生成中...",
    clear: "クリア",
    download: "ダウンロード",
    result_caption: "生成されたQRコード",
    preview_alt: "QRコード",

    error_input_required: "テキストを入力してください",
    error_generation_failed: "QRコードの生成に失敗しました",
    error_busy: "QRコードを生成中です",

    status_ready: "準備完了",
    status_generating: "QRコードを生成中...",
    status_generated: "QRコードを生成しました",
    status_failed: "QRコードの生成に失敗しました",
    status_saved: "保存先",
    status_save_failed: "保存に失敗しました",

    feature_fast_title: "高速生成",
    feature_fast_body: "ローカルで瞬時にQRコードを生成",
    feature_quality_title: "高品質",
    feature_quality_body: "エラー訂正レベルMで読み取り精度を保証",
    feature_download_title: "簡単ダウンロード",
    feature_download_body: "ワンクリックでPNG形式のQRコードを保存",

    settings_title: "設定",
    appearance: "外観",
    theme: "テーマ:",
    preview: "プレビュー:",
    language: "言語:",
    saving: "保存",
    file_name: "既定のファイル名:",
    remember_directory: "最後に保存したフォルダを記憶する",
    forget_directory: "消去",
    last_directory: "最後のフォルダ:",
    none: "なし",
    close: "閉じる",
};
