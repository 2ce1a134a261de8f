use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;
use umineko_quote_rust::models::all_characters;
use umineko_quote_rust::{parse_all_parallel, ApiError, Conf, Format, ParsedQuote};

struct CliArgs {
    script_path: Option<String>,
    list_characters: bool,
    config_path: Option<String>,
    json: bool,
    format: Format,
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {} <script_file> [--config <conf.json>] [--json] [--format plain|html]\n       {} --characters",
        program, program
    )
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let program = args.first().map(String::as_str).unwrap_or("quote-extractor");
    let mut script_path = None;
    let mut config_path = None;
    let mut json = false;
    let mut list_characters = false;
    let mut format = Format::PlainText;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                config_path = Some(iter.next().ok_or_else(|| usage(program))?.clone());
            }
            "--json" => json = true,
            "--characters" => list_characters = true,
            "--format" => {
                let name = iter.next().ok_or_else(|| usage(program))?;
                format = Format::from_str(name).map_err(|e| e.to_string())?;
            }
            _ if script_path.is_none() => script_path = Some(arg.clone()),
            _ => return Err(usage(program)),
        }
    }

    if script_path.is_none() && !list_characters {
        return Err(usage(program));
    }

    Ok(CliArgs {
        script_path,
        list_characters,
        config_path,
        json,
        format,
    })
}

fn print_summary(quotes: &[ParsedQuote], format: &Format) {
    let narrator = quotes.iter().filter(|q| q.character_id == "narrator").count();
    let red = quotes.iter().filter(|q| q.has_red_truth).count();
    let blue = quotes.iter().filter(|q| q.has_blue_truth).count();

    let mut per_episode: BTreeMap<i32, usize> = BTreeMap::new();
    for quote in quotes {
        *per_episode.entry(quote.episode).or_default() += 1;
    }

    println!("解析完成！");
    println!("引言数量: {}", quotes.len());
    println!("旁白数量: {}", narrator);
    println!("红字数量: {}", red);
    println!("蓝字数量: {}", blue);
    for (episode, count) in &per_episode {
        println!("- 第{}话: {}", episode, count);
    }

    if let Some(first) = quotes.iter().find(|q| q.character_id != "narrator") {
        let text = match format {
            Format::Html => &first.text_html,
            _ => &first.text,
        };
        println!("示例 [{}] {}", first.character, text);
    }
}

fn print_characters() {
    let characters: BTreeMap<String, String> = all_characters().into_iter().collect();
    for (id, name) in &characters {
        println!("{}\t{}", id, name);
    }
}

async fn run(args: CliArgs) -> Result<(), ApiError> {
    if args.list_characters {
        print_characters();
    }
    let Some(script_path) = &args.script_path else {
        return Ok(());
    };

    let conf = match &args.config_path {
        Some(path) => Conf::load(path)?,
        None => Conf::default(),
    };

    let content = fs::read_to_string(script_path)?;
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    let quotes = parse_all_parallel(lines, &conf).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&quotes)?);
    } else {
        print_summary(&quotes, &args.format);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // 日志输出到 stderr，不干扰 --json 输出
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("umineko_quote_rust=info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(message) => {
            println!("{}", message);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(cli).await {
        eprintln!("解析失败: {}", e);
        std::process::exit(1);
    }
}
