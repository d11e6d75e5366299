use anyhow::{bail, ensure, Context, Result};
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use std::{
    collections::HashSet,
    env,
    ffi::OsString,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use parrot38::parrot38::{
    delimiter::{Delimiter, DEFAULT_DELIMITER_CHAR, DEFAULT_MIN_LENGTH},
    dump, load_file, ParseOptions, Post,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Parrot38,
}

impl OutputFormat {
    fn of(name: &str) -> Result<Self> {
        match name {
            "json" => Ok(Self::Json),
            "parrot38" => Ok(Self::Parrot38),
            name => bail!("Unknown output format: {}", name),
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Parrot38 => "txt",
        }
    }
}

struct Args {
    input_paths: Vec<PathBuf>,
    output_path: Option<String>,
    encoding: Option<String>,
    format: OutputFormat,
    keep_going: bool,
    options: ParseOptions,
}

fn build_opts() -> getopts::Options {
    let mut opts = getopts::Options::new();
    opts.optopt(
        "d",
        "delimiter",
        &format!("separator character (default '{}')", DEFAULT_DELIMITER_CHAR),
        "CHAR",
    );
    opts.optopt(
        "m",
        "min-length",
        &format!("minimum separator length (default {})", DEFAULT_MIN_LENGTH),
        "N",
    );
    opts.optopt("e", "encoding", "input encoding (default utf-8)", "LABEL");
    opts.optflag("b", "backwards", "input lines are in bottom-to-top order");
    opts.optflag("t", "trim", "trim whitespace around post bodies");
    opts.optflag("k", "keep-going", "report invalid posts and continue");
    opts.optopt("f", "format", "json (default) or parrot38", "FORMAT");
    opts.optopt("o", "output", "write one file per post into DIR", "DIR");
    opts.optflag("h", "help", "print this help");
    opts
}

fn get_args() -> Result<Option<Args>> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args(&args)
}

fn parse_args(args: &[String]) -> Result<Option<Args>> {
    let opts = build_opts();

    let matches = match opts.parse(args) {
        Ok(m) => m,
        Err(f) => bail!(f),
    };

    if matches.opt_present("h") {
        print!("{}", opts.usage("Usage: parrot38 [options] FILE..."));
        return Ok(None);
    }

    ensure!(!matches.free.is_empty(), "at least one input file is required");
    let input_paths = matches.free.iter().map(PathBuf::from).collect();

    let min_length = match matches.opt_str("m") {
        Some(m) => m
            .parse()
            .with_context(|| format!("Invalid minimum length: {}", m))?,
        None => DEFAULT_MIN_LENGTH,
    };
    let delimiter = match matches.opt_str("d") {
        Some(d) => Delimiter::from_str_with_min_length(&d, min_length)?,
        None => Delimiter::new(DEFAULT_DELIMITER_CHAR, min_length)?,
    };

    let format = match matches.opt_str("f") {
        Some(f) => OutputFormat::of(&f)?,
        None => OutputFormat::Json,
    };

    Ok(Some(Args {
        input_paths,
        output_path: matches.opt_str("o"),
        encoding: matches.opt_str("e"),
        format,
        keep_going: matches.opt_present("k"),
        options: ParseOptions {
            delimiter,
            backwards: matches.opt_present("b"),
            trim_body: matches.opt_present("t"),
        },
    }))
}

enum BuildOut {
    Stdout {
        posts: Vec<Post>,
    },
    File {
        root: PathBuf,
        stems: HashSet<OsString>,
    },
}

impl BuildOut {
    fn init_file(root: &str) -> Result<Self> {
        let root = PathBuf::from(&root);
        fs::create_dir_all(&root).context("Failed to create output directory")?;

        Ok(Self::File {
            root,
            stems: HashSet::new(),
        })
    }

    fn save_posts(&mut self, input_path: &Path, posts: Vec<Post>, args: &Args) -> Result<()> {
        match self {
            BuildOut::Stdout { posts: all } => all.extend(posts),

            BuildOut::File { root, stems } => {
                let stem = input_path
                    .file_stem()
                    .with_context(|| format!("No file name: {}", input_path.display()))?;

                // 同じ名前のファイルが別のディレクトリにあると上書きしてしまう
                ensure!(
                    stems.insert(stem.to_owned()),
                    "Another input file has the same name: {}",
                    input_path.display()
                );

                let directory_path = root.join(stem);
                fs::create_dir_all(&directory_path)
                    .with_context(|| format!("Failed to create {}", directory_path.display()))?;

                for (i, post) in posts.iter().enumerate() {
                    let path = directory_path.join(format!("{}.{}", i, args.format.extension()));
                    fs::write(&path, render(std::slice::from_ref(post), args)?)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                }
            }
        }

        Ok(())
    }

    fn finish(self, args: &Args) -> Result<()> {
        if let BuildOut::Stdout { posts } = self {
            let mut stdout = io::stdout().lock();
            stdout.write_all(render(&posts, args)?.as_bytes())?;
            stdout.flush()?;
        }

        Ok(())
    }
}

fn render(posts: &[Post], args: &Args) -> Result<String> {
    match args.format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(posts)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Parrot38 => Ok(dump(posts, &args.options.delimiter)),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = match get_args()? {
        Some(args) => args,
        None => return Ok(()),
    };

    let mut out = if let Some(output_path) = &args.output_path {
        BuildOut::init_file(output_path)
            .with_context(|| format!("Failed to output directory: {}", output_path))?
    } else {
        BuildOut::Stdout { posts: Vec::new() }
    };

    let skipped = process_files(&args, &mut out)?;

    out.finish(&args)?;

    ensure!(skipped == 0, "{} invalid posts were skipped", skipped);

    Ok(())
}

// --keep-going のときに飛ばした記事の数を返す
fn process_files(args: &Args, out: &mut BuildOut) -> Result<usize> {
    for path in &args.input_paths {
        ensure!(path.exists(), "File not found: {}", path.display());
    }

    let pb = match out {
        BuildOut::File { .. } => create_progress_bar(args.input_paths.len() as u64)?,
        BuildOut::Stdout { .. } => ProgressBar::hidden(),
    };

    let mut skipped = 0;
    for path in args.input_paths.iter().progress_with(pb) {
        let results = load_file(path, &args.options, args.encoding.as_deref())?;

        let mut posts = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(post) => posts.push(post),
                Err(e) if args.keep_going => {
                    log::warn!("{}: {:#}", path.display(), anyhow::Error::new(e));
                    skipped += 1;
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to parse {}", path.display()))
                }
            }
        }

        log::debug!("{}: {} posts", path.display(), posts.len());

        out.save_posts(path, posts, args)?;
    }

    Ok(skipped)
}

fn create_progress_bar(len: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{percent:>3}% [{wide_bar:.cyan/blue}] {pos}/{len} [{elapsed_precise} < {eta_precise}]",
        )?
        .progress_chars("#-"),
    );
    Ok(pb)
}
