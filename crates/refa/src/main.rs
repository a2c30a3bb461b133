//! Command-line front end: one-shot conversion or an interactive loop.

use anyhow::{Context, Result};
use clap::Parser;
use refa::{Nfa, postfix_string, postfix_to_nfa, preprocess, subset_construction, to_postfix};
use std::io::{self, BufRead, Write};

/// Convert a regular expression into an NFA and render it with Graphviz.
#[derive(Parser)]
#[command(name = "refa", version)]
struct Cli {
    /// Regular expression to convert. If omitted, runs in interactive mode.
    pattern: Option<String>,

    /// Base name for output graph files (no extension).
    #[arg(short, long, default_value = "nfa_graph")]
    output: String,

    /// Print preprocessed and postfix representations.
    #[arg(short, long)]
    show_steps: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.pattern {
        Some(pattern) => {
            let nfa = build_nfa(&pattern, cli.show_steps)
                .with_context(|| format!("failed to process pattern '{pattern}'"))?;
            render_nfa(&nfa, &cli.output).context("failed to render the automaton")?;
            Ok(())
        }
        None => interactive(),
    }
}

/// Run the pattern-to-NFA pipeline, optionally printing each stage.
fn build_nfa(pattern: &str, show_steps: bool) -> Result<Nfa, refa::Error> {
    let preprocessed = preprocess(pattern)?;
    let postfix = to_postfix(&preprocessed)?;

    if show_steps {
        println!("Raw pattern    : {pattern}");
        println!("Preprocessed   : {preprocessed}");
        println!("Postfix        : {}", postfix_string(&postfix));
    }

    postfix_to_nfa(&postfix)
}

/// Render an NFA to `{output}.dot` / `{output}.png`.
///
/// Failure here never invalidates the automaton; the caller decides
/// whether it is fatal.
fn render_nfa(nfa: &Nfa, output: &str) -> Result<(), refa::Error> {
    match refa::render_to_file(&refa::nfa_dot(nfa), output) {
        Ok(png) => {
            println!("NFA rendered to '{output}.dot' and '{}'", png.display());
            Ok(())
        }
        Err(err) => {
            log::warn!("rendering failed (is Graphviz installed?): {err}");
            Err(err)
        }
    }
}

fn prompt(message: &str) -> io::Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None); // EOF
    }
    Ok(Some(line.trim().to_owned()))
}

/// Menu loop: build automata from patterns, determinize the latest one.
/// Errors are printed and the loop re-prompts; this mode always exits 0.
fn interactive() -> Result<()> {
    println!("Regular expression to NFA converter (interactive mode)");

    let mut last: Option<Nfa> = None;
    loop {
        println!();
        println!("  1) build an automaton from a pattern");
        println!("  2) determinize the last automaton and print it");
        println!("  q) quit");

        let Some(choice) = prompt("> ")? else {
            break;
        };
        match choice.as_str() {
            "1" => {
                let Some(pattern) = prompt("Enter a regular expression > ")? else {
                    break;
                };
                if pattern.is_empty() || pattern.eq_ignore_ascii_case("quit") {
                    break;
                }

                let Some(output) = prompt("Output filename (default 'nfa_graph') > ")? else {
                    break;
                };
                let output = if output.is_empty() {
                    "nfa_graph".to_owned()
                } else {
                    output
                };

                let Some(show) = prompt("Show preprocessing and postfix? [y/N] > ")? else {
                    break;
                };
                let show_steps = matches!(show.as_str(), "y" | "Y" | "yes");

                match build_nfa(&pattern, show_steps) {
                    Ok(nfa) => {
                        // A rendering failure is reported but the automaton
                        // stays usable for determinization.
                        if let Err(err) = render_nfa(&nfa, &output) {
                            println!("[error] {err}");
                        }
                        last = Some(nfa);
                    }
                    Err(err) => println!("[error] {err}"),
                }
            }
            "2" => match &last {
                Some(nfa) => print!("{}", subset_construction(nfa)),
                None => println!("No automaton built yet."),
            },
            "q" | "quit" | "exit" | "" => break,
            other => println!("Unknown choice: '{other}'"),
        }
    }

    println!("Goodbye.");
    Ok(())
}
