use std::fs;
use std::path::{
    Path,
    PathBuf
};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tabfunc::codec::codec::FunctionCodec;
use tabfunc::codec::compactcodec::CompactCodec;
use tabfunc::codec::descriptivecodec::DescriptiveCodec;
use tabfunc::codec::textcodec::TextCodec;
use tabfunc::configuration::Configuration;
use tabfunc::math::function::function::Function;
use tabfunc::tabulated::tabulatedfunction::TabulatedFunction;
use tabfunc::tabulated::tabulator::tabulate;

const DEFAULT_CONFIG_PATH: &str = "demo/config.json";
const HEX_BYTES_SHOWN: usize = 64;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Configuration::from_reader(&config_path)
        .with_context(|| format!("reading configuration {}", config_path.display()))?;
    info!(path = %config_path.display(), "configuration loaded");

    let function = config.function().build()?;
    let tabulated = tabulate(
        function.as_ref(),
        config.left_x(),
        config.right_x(),
        config.points_count(),
        config.storage(),
    )?;
    println!("{}", tabulated);
    print_function_values("source function", function.as_ref(), &tabulated);

    fs::create_dir_all(config.output_folder())?;
    let codecs: [(&str, &str, Box<dyn FunctionCodec>); 3] = [
        ("compact", "function.bin", Box::new(CompactCodec::with_storage(config.storage()))),
        ("descriptive", "function.ser", Box::new(DescriptiveCodec::new())),
        (
            "text",
            "function.txt",
            Box::new(TextCodec::new(config.text_precision(), config.storage())),
        ),
    ];

    for (name, file_name, codec) in codecs.iter() {
        let file_path = config.output_folder().join(file_name);
        codec.write_to_file(&tabulated, &file_path)?;
        let decoded = codec
            .read_from_file(&file_path)
            .with_context(|| format!("decoding {}", file_path.display()))?;
        let size = fs::metadata(&file_path)?.len();
        info!(codec = *name, file = %file_path.display(), size, "round trip finished");

        println!();
        println!("== {} codec: {} bytes ({:?} storage after decode)", name, size, decoded.kind());
        println!(
            "max |original - decoded| over sampled points: {:e}",
            max_abs_difference(&tabulated, &decoded)
        );
        show_file_hex(&file_path, HEX_BYTES_SHOWN)?;
    }
    Ok(())
}

fn print_function_values(title: &str, source: &dyn Function, tabulated: &TabulatedFunction) {
    println!();
    println!("{}: x, f(x), tabulated(x)", title);
    let left_x = tabulated.left_domain_border();
    let right_x = tabulated.right_domain_border();
    let steps = 2 * (tabulated.points_count() - 1);
    for i in 0..=steps {
        let x = left_x + (right_x - left_x) * i as f64 / steps as f64;
        println!("{:10.4} {:12.6} {:12.6}", x, source.value(x), tabulated.value(x));
    }
}

fn max_abs_difference(lhs: &TabulatedFunction, rhs: &TabulatedFunction) -> f64 {
    lhs.points()
        .iter()
        .map(|point| (point.y() - rhs.value(point.x())).abs())
        .fold(0.0, f64::max)
}

fn show_file_hex(file_path: &Path, bytes_to_show: usize) -> anyhow::Result<()> {
    let bytes = fs::read(file_path)?;
    let shown = &bytes[..bytes.len().min(bytes_to_show)];
    for (row, chunk) in shown.chunks(16).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
        println!("{:08x}  {}", row * 16, hex.join(" "));
    }
    if bytes.len() > bytes_to_show {
        println!("... {} more bytes", bytes.len() - bytes_to_show);
    }
    Ok(())
}
