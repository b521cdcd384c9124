use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";

    pub const SECTION_RESERVOIR: &str = "section.reservoir";
    pub const SECTION_SIMULATION: &str = "section.simulation";
    pub const SECTION_DISPLAY: &str = "section.display";

    pub const FIELD_OOIP: &str = "field.ooip";
    pub const FIELD_INITIAL_PRESSURE: &str = "field.initial_pressure";
    pub const FIELD_BUBBLE_POINT: &str = "field.bubble_point";
    pub const FIELD_INITIAL_FVF: &str = "field.initial_fvf";
    pub const FIELD_OIL_COMPRESSIBILITY: &str = "field.oil_compressibility";
    pub const FIELD_FORMATION_COMPRESSIBILITY: &str = "field.formation_compressibility";
    pub const FIELD_NUM_STEPS: &str = "field.num_steps";
    pub const FIELD_FINAL_PRESSURE: &str = "field.final_pressure";

    pub const PROMPT_KEEP_DEFAULT: &str = "prompt.keep_default";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const WARNING_ADJUSTED: &str = "warning.adjusted";

    pub const RESULT_FINAL_WITHDRAWAL: &str = "result.final_withdrawal";
    pub const NOTE_BUBBLE_POINT: &str = "note.bubble_point";

    pub const GUI_SHOW_BREAKDOWN: &str = "gui.show_breakdown";
    pub const GUI_EXPORT: &str = "gui.export";
    pub const GUI_EXPORTED: &str = "gui.exported";
    pub const GUI_RESET: &str = "gui.reset";
    pub const GUI_SETTINGS: &str = "gui.settings";
    pub const GUI_SAVE_SETTINGS: &str = "gui.save_settings";
    pub const GUI_SAVED: &str = "gui.saved";
    pub const GUI_LANGUAGE: &str = "gui.language";
    pub const GUI_ALPHA: &str = "gui.alpha";
    pub const GUI_FORMULA: &str = "gui.formula";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    lang: Language,
}

impl Translator {
    /// 언어 코드에 따라 번역기를 생성한다. ko로 시작하지 않으면 영어를 쓴다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
        }
    }

    /// 번역을 가져온다. 한국어 번역이 없으면 영어 문자열로 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        match self.lang {
            Language::Ko => ko(key).unwrap_or_else(|| en(key)),
            Language::En => en(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn detect_system_language() -> Option<String> {
    get_locale().and_then(|l| normalize_lang(&l))
}

fn en(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Error",
        SECTION_RESERVOIR => "Input Reservoir Properties",
        SECTION_SIMULATION => "Simulation Parameters",
        SECTION_DISPLAY => "Display",
        FIELD_OOIP => "OOIP (STB)",
        FIELD_INITIAL_PRESSURE => "Initial Pressure (psi)",
        FIELD_BUBBLE_POINT => "Bubble Point Pressure (psi)",
        FIELD_INITIAL_FVF => "Initial Oil Formation Volume Factor (rb/stb)",
        FIELD_OIL_COMPRESSIBILITY => "Oil Compressibility (1/psi)",
        FIELD_FORMATION_COMPRESSIBILITY => "Formation Compressibility (1/psi)",
        FIELD_NUM_STEPS => "Number of Pressure Steps",
        FIELD_FINAL_PRESSURE => "Final Pressure (psi)",
        PROMPT_KEEP_DEFAULT => "(enter = keep)",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        WARNING_ADJUSTED => "Adjusted input:",
        RESULT_FINAL_WITHDRAWAL => "Cumulative withdrawal at final pressure:",
        NOTE_BUBBLE_POINT => "Undersaturated depletion assumed; bubble point is not used.",
        GUI_SHOW_BREAKDOWN => "Show B_o / E_o / E_f columns",
        GUI_EXPORT => "Export CSV/JSON",
        GUI_EXPORTED => "Saved:",
        GUI_RESET => "Reset to defaults",
        GUI_SETTINGS => "Settings",
        GUI_SAVE_SETTINGS => "Save settings",
        GUI_SAVED => "Saved.",
        GUI_LANGUAGE => "Language",
        GUI_ALPHA => "Window transparency",
        GUI_FORMULA => "Formula reference",
        _ => "[missing translation]",
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        SECTION_RESERVOIR => "저류층 물성 입력",
        SECTION_SIMULATION => "시뮬레이션 설정",
        SECTION_DISPLAY => "표시",
        FIELD_OOIP => "원시 부존량 OOIP (STB)",
        FIELD_INITIAL_PRESSURE => "초기 압력 (psi)",
        FIELD_BUBBLE_POINT => "기포점 압력 (psi)",
        FIELD_INITIAL_FVF => "초기 오일 용적계수 (rb/stb)",
        FIELD_OIL_COMPRESSIBILITY => "오일 압축률 (1/psi)",
        FIELD_FORMATION_COMPRESSIBILITY => "암석 압축률 (1/psi)",
        FIELD_NUM_STEPS => "압력 단계 수",
        FIELD_FINAL_PRESSURE => "최종 압력 (psi)",
        PROMPT_KEEP_DEFAULT => "(엔터 = 유지)",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        WARNING_ADJUSTED => "입력값 보정:",
        RESULT_FINAL_WITHDRAWAL => "최종 압력에서의 누적 인출량:",
        NOTE_BUBBLE_POINT => "미포화 감압을 가정하며 기포점 압력은 계산에 쓰이지 않습니다.",
        GUI_SHOW_BREAKDOWN => "B_o / E_o / E_f 열 표시",
        GUI_EXPORT => "CSV/JSON 내보내기",
        GUI_EXPORTED => "저장됨:",
        GUI_RESET => "기본값으로",
        GUI_SETTINGS => "설정",
        GUI_SAVE_SETTINGS => "설정 저장",
        GUI_SAVED => "저장했습니다.",
        GUI_LANGUAGE => "언어",
        GUI_ALPHA => "창 투명도",
        GUI_FORMULA => "계산식",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flag_wins_over_config() {
        assert_eq!(resolve_language("ko-KR", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en-uk")), "en-us");
    }

    #[test]
    fn korean_falls_back_to_english() {
        let tr = Translator::new("ko");
        assert_eq!(tr.t(keys::FIELD_NUM_STEPS), "압력 단계 수");
        assert_eq!(tr.t("unknown.key"), "[missing translation]");
        assert_eq!(Translator::new("en-us").t(keys::FIELD_OOIP), "OOIP (STB)");
    }
}
