use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::input::InputForm;
use crate::report::DisplayUnits;
use crate::units::{PressureUnit, VolumeUnit};

pub const CONFIG_FILE: &str = "config.toml";
/// GUI 투명도 슬라이더 범위
pub const WINDOW_ALPHA_MIN: f32 = 0.3;
pub const WINDOW_ALPHA_MAX: f32 = 1.0;

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UI 언어 코드(auto/ko/en-us)
    pub language: String,
    /// 결과 표시 압력 단위
    pub pressure_unit: PressureUnit,
    /// 결과 표시 체적 단위
    pub volume_unit: VolumeUnit,
    /// 표에 B_o/E_o/E_f 열 표시 여부
    pub show_breakdown: bool,
    /// GUI 창 투명도
    pub window_alpha: f32,
    /// 마지막 입력값
    pub inputs: InputForm,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            pressure_unit: PressureUnit::Psi,
            volume_unit: VolumeUnit::Stb,
            show_breakdown: false,
            window_alpha: 1.0,
            inputs: InputForm::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(Path::new(CONFIG_FILE))
}

/// 지정 경로의 설정을 읽는다. 파일이 없으면 기본값을 저장한 뒤 반환한다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let mut cfg: Config = toml::from_str(&content)?;
        cfg.sanitize();
        info!(path = %path.display(), "설정 로드");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        info!(path = %path.display(), "기본 설정 생성");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 수기로 편집된 값을 GUI가 다룰 수 있는 범위로 되돌린다.
    pub fn sanitize(&mut self) {
        let alpha = if self.window_alpha.is_finite() {
            self.window_alpha.clamp(WINDOW_ALPHA_MIN, WINDOW_ALPHA_MAX)
        } else {
            WINDOW_ALPHA_MAX
        };
        if alpha != self.window_alpha {
            warn!(from = self.window_alpha, to = alpha, "window_alpha 보정");
            self.window_alpha = alpha;
        }
    }

    pub fn display_units(&self) -> DisplayUnits {
        DisplayUnits {
            pressure: self.pressure_unit,
            volume: self.volume_unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("ddt_{}_{name}.toml", std::process::id()))
    }

    #[test]
    fn missing_file_creates_defaults() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn saved_settings_are_restored() {
        let path = temp_path("saved");
        let mut cfg = Config::default();
        cfg.pressure_unit = PressureUnit::Bar;
        cfg.show_breakdown = true;
        cfg.inputs.num_steps = 25;
        cfg.save_to(&path).unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn out_of_range_alpha_is_clamped_on_load() {
        let path = temp_path("alpha");
        let cases = [("0.0", WINDOW_ALPHA_MIN), ("2.5", WINDOW_ALPHA_MAX), ("0.6", 0.6)];
        for (raw, expected) in cases {
            fs::write(&path, format!("window_alpha = {raw}\n")).unwrap();
            let cfg = load_from(&path).unwrap();
            assert_eq!(cfg.window_alpha, expected, "{raw}");
        }
        fs::write(&path, "window_alpha = nan\n").unwrap();
        assert_eq!(load_from(&path).unwrap().window_alpha, WINDOW_ALPHA_MAX);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let path = temp_path("partial");
        fs::write(&path, "language = \"ko\"\n").unwrap();
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.language, "ko");
        assert_eq!(cfg.inputs, InputForm::default());
        let _ = fs::remove_file(&path);
    }
}
