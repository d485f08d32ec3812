use std::path::PathBuf;

use thiserror::Error;

use crate::config::Config;
use crate::conversion;
use crate::flow::FlowError;
use crate::i18n::{self, Translator};
use crate::nozzle::NozzleError;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] conversion::ConversionError),
    #[error("물질수지 계산 오류: {0}")]
    Flow(#[from] FlowError),
    #[error("노즐 형상 계산 오류: {0}")]
    Nozzle(#[from] NozzleError),
}

/// 대화형 세션 상태. 설정과 저장 경로, 번역기를 함께 들고 다닌다.
pub struct Session {
    pub config: Config,
    pub config_path: PathBuf,
    pub tr: Translator,
}

impl Session {
    pub fn new(config: Config, config_path: PathBuf, lang_code: &str) -> Self {
        let tr = Translator::new_with_pack(lang_code, config.language_pack_dir.as_deref());
        Self {
            config,
            config_path,
            tr,
        }
    }

    /// 설정에 저장된 언어로 번역기를 다시 만든다.
    pub fn reload_translator(&mut self) {
        let code = i18n::resolve_language(&self.config.language, None);
        self.tr = Translator::new_with_pack(&code, self.config.language_pack_dir.as_deref());
    }

    fn save(&self) -> Result<(), AppError> {
        self.config.save_to(&self.config_path)?;
        Ok(())
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 계산 단계의 입력 오류는 메시지만 출력하고 메뉴로 돌아간다.
pub fn run(session: &mut Session) -> Result<(), AppError> {
    loop {
        let outcome = match ui_cli::main_menu(&session.tr)? {
            MenuChoice::FlowBalance => ui_cli::handle_flow_balance(session),
            MenuChoice::Nozzle => ui_cli::handle_nozzle(session),
            MenuChoice::UnitConversion => ui_cli::handle_unit_conversion(&session.tr),
            MenuChoice::Settings => ui_cli::handle_settings(session).and_then(|()| {
                session.save()?;
                session.reload_translator();
                println!("{}", session.tr.t(i18n::keys::SETTINGS_SAVED));
                Ok(())
            }),
            MenuChoice::Exit => {
                session.save()?;
                println!("{}", session.tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        match outcome {
            Ok(()) => {}
            Err(AppError::Io(e)) => return Err(AppError::Io(e)),
            Err(e) => {
                tracing::warn!(error = %e, "calculation rejected");
                println!("{}: {e}", session.tr.t(i18n::keys::ERROR_PREFIX));
            }
        }
    }
    Ok(())
}
