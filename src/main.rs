use clap::Parser;
use depletion_drive_toolbox::{app, config};
use std::process::ExitCode;

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 계산을 실행한다.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = app::CliArgs::parse();
    match try_run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("오류: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(args: &app::CliArgs) -> Result<(), app::AppError> {
    let mut cfg = config::load_or_default()?;
    app::run(args, &mut cfg)
}
