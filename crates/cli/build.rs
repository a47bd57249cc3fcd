use std::{env, fs, path::PathBuf};

fn input_args(cmd: clap::Command) -> clap::Command {
    cmd.arg(clap::arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(clap::arg!(--base_url <URL> "Base URL for resolving relative links in file or stdin input").value_name("URL"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(-v --verbose "Print progress and details to stderr"))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let extract = input_args(clap::Command::new("extract").about("Extract the readable article"))
        .arg(clap::arg!(--markdown "Output the Markdown rendering instead of plain text"))
        .arg(clap::arg!(--json "Output the full article as JSON"));
    let opengraph = input_args(clap::Command::new("opengraph").about("Read only Open Graph / Twitter Card metadata"));
    let completions = clap::Command::new("completions")
        .about("Print a shell completion script")
        .arg(clap::arg!(<SHELL> "Target shell").value_parser(["bash", "elvish", "fish", "powershell", "zsh"]));

    let mut cmd = clap::Command::new("page-zen")
        .version("1.0.0")
        .about("Clean articles and read link-preview metadata from web pages")
        .subcommand_required(true)
        .subcommand(extract)
        .subcommand(opengraph)
        .subcommand(completions);

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "page-zen", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "page-zen", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "page-zen", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "page-zen", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
