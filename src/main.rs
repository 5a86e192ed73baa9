// ==========================================
// 商业表格处理系统 - 命令行入口
// ==========================================
// 用法: planilla-proc [--config FILE] [--out-dir DIR] [--json] FILES...
// 退出码: 任一文件失败 → 1
// ==========================================

use anyhow::{Context, Result};
use clap::Parser;
use planilla_proc::{
    format_summary, logging, InputFile, ProcessingConfig, WorkbookProcessor,
    WorkbookProcessorImpl,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "planilla-proc",
    version,
    about = "Normaliza y repara planillas comerciales (DISTRIBUIDOR, LISTA DE PRECIOS, CLIENTES)"
)]
struct Cli {
    /// Archivo de configuración JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directorio donde se escriben los libros procesados
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Imprime los resultados en JSON en lugar del resumen
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Archivos a procesar
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

async fn read_inputs(paths: &[PathBuf]) -> Result<Vec<InputFile>> {
    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("no se pudo leer {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        inputs.push(InputFile::new(name, bytes));
    }
    Ok(inputs)
}

async fn run(cli: Cli) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => ProcessingConfig::from_json_file(path)
            .with_context(|| format!("configuración inválida: {}", path.display()))?,
        None => ProcessingConfig::default(),
    };

    let inputs = read_inputs(&cli.files).await?;
    let processor = WorkbookProcessorImpl::new(config);
    let results = processor.process_files(&inputs).await;

    tokio::fs::create_dir_all(&cli.out_dir)
        .await
        .with_context(|| format!("no se pudo crear {}", cli.out_dir.display()))?;
    for output in results.iter().filter_map(|r| r.output.as_ref()) {
        let target = Path::new(&cli.out_dir).join(&output.file_name);
        tokio::fs::write(&target, &output.bytes)
            .await
            .with_context(|| format!("no se pudo escribir {}", target.display()))?;
        info!(file = %target.display(), "libro procesado guardado");
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print!("{}", format_summary(&results));
    }

    Ok(results.iter().all(|r| r.success))
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
