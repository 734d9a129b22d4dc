use clap::Parser;
use dress_code_ai::{analyzer, cli, config, error, event_picker, source};
use dress_code_common::{build_description_prompt, DressCodeEvaluator};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> ExitCode {
    // .env があれば読み込む（なくてもよい）
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error::user_message(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { source: input, event, output, narrate, catalog, use_cache } => {
            println!("👔 dress-code-ai - Análise de vestimenta\n");

            let evaluator = DressCodeEvaluator::new(config.load_catalog(catalog.as_deref())?);
            let event = event_picker::resolve_event(evaluator.catalog(), event)?;
            let rules = evaluator.catalog().lookup(&event)?;
            let prompt = build_description_prompt(Some(rules));

            // 1. 画像ソース展開
            println!("[1/3] Carregando imagens...");
            let photos = source::ImageSource::parse(&input).photos()?;
            println!("✔ {} imagem(ns)\n", photos.len());

            let describer = analyzer::Describer::new(cli.ai_provider, &config)?;

            let cache_dir = if use_cache { Some(analyzer::CacheFile::default_dir()?) } else { None };
            let mut cache = cache_dir.as_deref().map(analyzer::CacheFile::load);

            // 2. AI解析 + 服装判定
            println!(
                "[2/3] Analisando ({} / {})...{}\n",
                describer.provider(),
                describer.model(),
                if use_cache { " (cache ativado)" } else { "" }
            );

            let options = analyzer::BatchOptions {
                event: &event,
                prompt: &prompt,
                max_image_size: config.max_image_size,
                narrate: narrate.as_deref(),
                tts_language: &config.tts_language,
            };
            let outcome =
                analyzer::analyze_photos(&photos, &evaluator, &describer, cache.as_mut(), &options).await;

            // 失敗があっても取得済みの説明文は保存
            if let (Some(cache), Some(dir)) = (&cache, &cache_dir) {
                cache.save(dir)?;
            }

            // 3. 結果保存
            println!("[3/3] Resumo");
            println!(
                "✔ {}/{} adequada(s) para {}",
                outcome.appropriate_count(),
                outcome.reports.len(),
                event
            );
            if !outcome.failures.is_empty() {
                println!("✖ {} imagem(ns) com erro:", outcome.failures.len());
                for failure in &outcome.failures {
                    println!("  {}: {}", failure.source, failure.error);
                }
            }

            if let Some(output) = output {
                outcome.write_report(&output)?;
                println!("✔ Resultado salvo: {}", output.display());
            }

            outcome.check()?;
        }

        Commands::Evaluate { event, description, file, catalog } => {
            let evaluator = DressCodeEvaluator::new(config.load_catalog(catalog.as_deref())?);

            // --file 指定時は引数をパスとして読む
            let description = if file {
                let path = std::path::Path::new(&description);
                if !path.exists() {
                    return Err(error::DressCodeError::FileNotFound(path.display().to_string()));
                }
                std::fs::read_to_string(path)?
            } else {
                description
            };

            let analysis = evaluator.analyze(&event, &description)?;
            println!("{}", analysis.full_text());
        }

        Commands::Events { catalog } => {
            let catalog = config.load_catalog(catalog.as_deref())?;
            println!("Eventos disponíveis:");
            for event in catalog.events() {
                println!("  {} - {}", event.name, event.description);
                if cli.verbose {
                    println!("    adequado:   {}", event.appropriate.join(", "));
                    println!("    inadequado: {}", event.inappropriate.join(", "));
                }
            }
        }

        Commands::Config { set_api_key, set_model, set_catalog, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(key) = set_api_key {
                config.api_key = Some(key);
                changed = true;
                println!("✔ Chave de API configurada");
            }

            if let Some(model) = set_model {
                config.model = model;
                changed = true;
                println!("✔ Modelo configurado: {}", config.model);
            }

            if let Some(path) = set_catalog {
                // 保存前に検証
                config.load_catalog(Some(path.as_path()))?;
                config.catalog_path = Some(path);
                changed = true;
                println!("✔ Catálogo configurado");
            }

            if changed {
                config.save()?;
            }

            if show {
                println!("Configuração:");
                println!("  Modelo: {}", config.model);
                println!("  Tamanho máximo da imagem: {}px", config.max_image_size);
                println!("  Timeout: {}s", config.timeout_seconds);
                println!("  Idioma da narração: {}", config.tts_language);
                println!(
                    "  Catálogo: {}",
                    config
                        .catalog_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(embutido)".to_string())
                );
                println!("  Chave de API: {}", if config.has_api_key() { "configurada" } else { "não configurada" });
            }
        }

        Commands::Cache { clear, info } => {
            let cache_dir = analyzer::CacheFile::default_dir()?;
            let cache_path = analyzer::CacheFile::cache_path(&cache_dir);

            if info || !clear {
                // デフォルトまたは--info: 情報表示
                if cache_path.exists() {
                    let cache = analyzer::CacheFile::load(&cache_dir);
                    println!("Cache:");
                    println!("  Caminho: {}", cache_path.display());
                    println!("  Entradas: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  Tamanho: {} bytes", meta.len());
                    }
                } else {
                    println!("Arquivo de cache não existe: {}", cache_path.display());
                }
            }

            if clear {
                match analyzer::CacheFile::clear(&cache_dir) {
                    Ok(true) => println!("✔ Cache removido: {}", cache_path.display()),
                    Ok(false) => println!("Arquivo de cache não existe"),
                    Err(e) => eprintln!("Erro ao remover o cache: {}", e),
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    // RUST_LOG があればそちらを優先
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    // 二重初期化は無視
    tracing::subscriber::set_global_default(subscriber).ok();
}
