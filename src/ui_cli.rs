use std::io::{self, Write};
use std::str::FromStr;

use crate::app::AppError;
use crate::i18n::{keys, Translator};
use crate::input::InputForm;

/// 입력 폼의 각 필드를 차례로 묻는다. 빈 입력은 기존 값을 유지한다.
pub fn prompt_form(tr: &Translator, current: InputForm) -> Result<InputForm, AppError> {
    println!("\n-- {} --", tr.t(keys::SECTION_RESERVOIR));
    let ooip = read_or_keep(tr, tr.t(keys::FIELD_OOIP), current.ooip)?;
    let initial_pressure =
        read_or_keep(tr, tr.t(keys::FIELD_INITIAL_PRESSURE), current.initial_pressure)?;
    let bubble_point_pressure =
        read_or_keep(tr, tr.t(keys::FIELD_BUBBLE_POINT), current.bubble_point_pressure)?;
    let initial_fvf = read_or_keep(tr, tr.t(keys::FIELD_INITIAL_FVF), current.initial_fvf)?;
    let oil_compressibility =
        read_or_keep(tr, tr.t(keys::FIELD_OIL_COMPRESSIBILITY), current.oil_compressibility)?;
    let formation_compressibility = read_or_keep(
        tr,
        tr.t(keys::FIELD_FORMATION_COMPRESSIBILITY),
        current.formation_compressibility,
    )?;

    println!("\n-- {} --", tr.t(keys::SECTION_SIMULATION));
    let num_steps = read_or_keep(tr, tr.t(keys::FIELD_NUM_STEPS), current.num_steps)?;
    let final_pressure =
        read_or_keep(tr, tr.t(keys::FIELD_FINAL_PRESSURE), current.final_pressure)?;

    Ok(InputForm {
        ooip,
        initial_pressure,
        bubble_point_pressure,
        initial_fvf,
        oil_compressibility,
        formation_compressibility,
        num_steps,
        final_pressure,
    })
}

fn read_or_keep<T>(tr: &Translator, label: &str, current: T) -> Result<T, AppError>
where
    T: FromStr + Copy + std::fmt::Display,
{
    loop {
        let keep = tr.t(keys::PROMPT_KEEP_DEFAULT);
        let line = read_line(&format!("{label} [{current}] {keep}: "))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(current);
        }
        match trimmed.parse::<T>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}
