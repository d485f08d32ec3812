use clap::{Parser, Subcommand, ValueEnum};
use process_sizing_toolbox::{app, config, flow, i18n, nozzle, ui_cli};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "process_sizing_toolbox_cli")]
#[command(about = "용기 물질수지/체류시간 및 노즐형 타공 계산기", long_about = None)]
struct Cli {
    /// 표시 언어 (auto/ko/en)
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,
    /// 설정 파일 경로
    #[arg(long, default_value = config::CONFIG_FILE)]
    config: PathBuf,
    /// 생략하면 대화형 메뉴를 실행한다
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// 재료 질량 기준
    A,
    /// 밀도/체적 기준
    B,
}

#[derive(Subcommand)]
enum Commands {
    /// 용기 물질수지와 체류시간을 한 번 계산한다
    Flow {
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        /// 건조 원료 투입량 [kg/h]
        #[arg(long)]
        dry_feed: Option<f64>,
        /// 함수율 [%]
        #[arg(long)]
        moisture: Option<f64>,
        /// 용기 체적 [m3]
        #[arg(long)]
        vessel_volume: Option<f64>,
        /// 벌크 밀도 [g/L]
        #[arg(long)]
        bulk_density: Option<f64>,
        /// 액체 투입량 [kg/h], 여러 번 지정 가능
        #[arg(long = "liquid")]
        liquids: Vec<f64>,
        /// 용기 내 재료 질량 [kg]
        #[arg(long)]
        material_weight: Option<f64>,
        /// 물 투입량 [kg/h]
        #[arg(long)]
        water: Option<f64>,
    },
    /// 노즐형 타공 형상을 한 번 계산한다
    Nozzle {
        /// 판 두께 [mm]
        #[arg(long)]
        plate: Option<f64>,
        /// 원뿔 입구 직경 [mm]
        #[arg(long)]
        cone_diameter: Option<f64>,
        /// 최종 구멍 직경 [mm]
        #[arg(long)]
        final_diameter: Option<f64>,
        /// 원뿔 각도 [°]
        #[arg(long)]
        cone_angle: Option<f64>,
        /// 원뿔 길이 [mm]
        #[arg(long)]
        cone_length: Option<f64>,
        /// 채널 길이 [mm]
        #[arg(long)]
        channel_length: Option<f64>,
        /// 구멍 수
        #[arg(long)]
        holes: Option<u32>,
        /// 처리량 [t/h]
        #[arg(long)]
        throughput: Option<f64>,
    },
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), app::AppError> {
    let cli = Cli::parse();
    let cfg = config::load_from(&cli.config)?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let mut session = app::Session::new(cfg, cli.config, &lang);

    match cli.command {
        None => app::run(&mut session),
        Some(Commands::Flow {
            mode,
            dry_feed,
            moisture,
            vessel_volume,
            bulk_density,
            liquids,
            material_weight,
            water,
        }) => {
            let overrides = flow::FlowOverrides {
                mode: mode.map(|m| match m {
                    ModeArg::A => flow::FlowMode::MassReference,
                    ModeArg::B => flow::FlowMode::DensityVolume,
                }),
                dry_feed_kg_per_h: dry_feed,
                moisture_content_pct: moisture,
                vessel_volume_m3: vessel_volume,
                bulk_density_g_per_l: bulk_density,
                liquid_inputs_kg_per_h: liquids,
                material_weight_kg: material_weight,
                water_input_kg_per_h: water,
            };
            let (input, mode) =
                overrides.apply(&session.config.flow, session.config.flow_mode)?;
            let result = flow::compute_flow_balance(&input, mode)?;
            ui_cli::print_flow_result(&session.tr, &session.config.display_units, &result);
            Ok(())
        }
        Some(Commands::Nozzle {
            plate,
            cone_diameter,
            final_diameter,
            cone_angle,
            cone_length,
            channel_length,
            holes,
            throughput,
        }) => {
            let mut input = session.config.nozzle.clone();
            if let Some(v) = plate {
                input.plate_thickness_mm = v;
            }
            if let Some(v) = cone_diameter {
                input.cone_diameter_mm = v;
            }
            if let Some(v) = final_diameter {
                input.final_diameter_mm = v;
            }
            if let Some(v) = cone_angle {
                input.cone_angle_deg = v;
            }
            if let Some(v) = cone_length {
                input.cone_length_mm = v;
            }
            if channel_length.is_some() {
                input.channel_length_mm = channel_length;
            }
            if let Some(v) = holes {
                input.num_holes = v;
            }
            if let Some(v) = throughput {
                input.throughput_t_per_h = v;
            }
            let geometry =
                nozzle::compute_nozzle_geometry_with(&input, session.config.solid_resolution)?;
            ui_cli::print_nozzle_geometry(
                &session.tr,
                &session.config.display_units,
                &input,
                &geometry,
            );
            Ok(())
        }
    }
}
