//! A small interactive shell for the record store.
//!
//! One session owns one in-memory store behind a `parking_lot::RwLock`; the
//! lock is the session's mutual-exclusion discipline around store mutation
//! (the core itself defines none). Values with spaces are quoted:
//! `add "never odd or even"`.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use colored::Colorize;
use parking_lot::RwLock;
use stringdex_query::{InterpretedQuery, Interpreter, PredicateSet};
use stringdex_store::{evaluate, InMemoryStore, Record, RecordStore};

struct ReplState {
    store: Arc<RwLock<InMemoryStore>>,
    interpreter: Interpreter,
}

impl Default for ReplState {
    fn default() -> Self {
        Self {
            store: Arc::new(RwLock::new(InMemoryStore::new())),
            interpreter: Interpreter::new(),
        }
    }
}

enum ReplControl {
    Continue,
    Exit,
}

pub fn cmd_repl(initial_commands: &[String]) -> Result<()> {
    let mut state = ReplState::default();

    for line in initial_commands {
        println!("stringdex> {line}");
        match dispatch(&mut state, line) {
            Ok(ReplControl::Continue) => {}
            Ok(ReplControl::Exit) => return Ok(()),
            Err(e) => eprintln!("{} {e}", "error:".red().bold()),
        }
    }

    println!("{}", "Stringdex REPL".green().bold());
    println!("Type `help` for commands. Type `exit` to quit.\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("stringdex> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match dispatch(&mut state, line) {
            Ok(ReplControl::Continue) => {}
            Ok(ReplControl::Exit) => break,
            Err(e) => eprintln!("{} {e}", "error:".red().bold()),
        }
    }

    Ok(())
}

fn dispatch(state: &mut ReplState, line: &str) -> Result<ReplControl> {
    let tokens = tokenize(line);
    let Some(cmd) = tokens.first() else {
        return Ok(ReplControl::Continue);
    };

    match cmd.as_str() {
        "help" => {
            print_help();
            Ok(ReplControl::Continue)
        }
        "exit" | "quit" => Ok(ReplControl::Exit),
        "add" => cmd_add(state, &tokens[1..]),
        "get" => cmd_get(state, &tokens[1..]),
        "del" => cmd_del(state, &tokens[1..]),
        "list" => cmd_list(state),
        "filter" => cmd_filter(state, &tokens[1..]),
        "ask" => cmd_ask(state, &tokens[1..]),
        other => Err(anyhow!("unknown command `{other}`; try `help`")),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  add <value>              store a string and print its record");
    println!("  get <value>              print the record for a string");
    println!("  del <value>              delete the record for a string");
    println!("  list                     print all records in insertion order");
    println!("  filter key=value ...     structured filter; keys: is_palindrome,");
    println!("                           min_length, max_length, word_count,");
    println!("                           contains_character");
    println!("  ask <free text>          natural-language filter, e.g.");
    println!("                           ask all single word palindromic strings");
    println!("  help                     this message");
    println!("  exit                     quit");
}

fn single_value(tokens: &[String], usage: &str) -> Result<String> {
    match tokens {
        [value] => Ok(value.clone()),
        _ => Err(anyhow!("usage: {usage} (quote values with spaces)")),
    }
}

fn cmd_add(state: &mut ReplState, args: &[String]) -> Result<ReplControl> {
    let value = single_value(args, "add <value>")?;
    // The store accepts any string; rejecting blank input is this boundary's
    // policy, mirroring the service API it stands in for.
    if value.trim().is_empty() {
        return Err(anyhow!("`value` cannot be empty"));
    }

    let record = state.store.write().insert(&value)?;
    println!("{}", "stored".green());
    print_record(&record);
    Ok(ReplControl::Continue)
}

fn cmd_get(state: &mut ReplState, args: &[String]) -> Result<ReplControl> {
    let value = single_value(args, "get <value>")?;
    let store = state.store.read();
    let Some(record) = store.lookup(&value) else {
        return Err(anyhow!("no record for {value:?}"));
    };
    print_record(record);
    Ok(ReplControl::Continue)
}

fn cmd_del(state: &mut ReplState, args: &[String]) -> Result<ReplControl> {
    let value = single_value(args, "del <value>")?;
    let record = state.store.write().remove(&value)?;
    println!("{} {}", "deleted".yellow(), record.id);
    Ok(ReplControl::Continue)
}

fn cmd_list(state: &ReplState) -> Result<ReplControl> {
    let store = state.store.read();
    for record in store.records() {
        print_record(record);
    }
    println!("{} record(s)", store.len());
    Ok(ReplControl::Continue)
}

fn cmd_filter(state: &ReplState, args: &[String]) -> Result<ReplControl> {
    if args.is_empty() {
        return Err(anyhow!("usage: filter key=value ..."));
    }
    let predicates = parse_structured_filters(args)?;
    // Boundary shape check; the evaluator's defensive non-match is only a
    // backstop behind this.
    predicates.validate()?;

    let store = state.store.read();
    let results = evaluate(&*store, &predicates);
    print_results(&results);
    println!("filters applied: {}", serde_json::to_string(&predicates)?);
    Ok(ReplControl::Continue)
}

fn cmd_ask(state: &ReplState, args: &[String]) -> Result<ReplControl> {
    if args.is_empty() {
        return Err(anyhow!("usage: ask <free-text query>"));
    }
    let query = args.join(" ");
    let predicates = state.interpreter.interpret(&query)?;
    let interpreted = InterpretedQuery {
        original: query,
        predicates,
    };

    let store = state.store.read();
    let results = evaluate(&*store, &interpreted.predicates);
    print_results(&results);
    println!("interpreted query: {}", serde_json::to_string(&interpreted)?);
    Ok(ReplControl::Continue)
}

/// Parse `key=value` pairs into a `PredicateSet`. A repeated key keeps the
/// last occurrence, matching the predicate model's one-constraint-per-name
/// invariant.
fn parse_structured_filters(args: &[String]) -> Result<PredicateSet> {
    let mut out = PredicateSet::new();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            return Err(anyhow!("expected key=value, got {arg:?}"));
        };
        match key {
            "is_palindrome" => {
                out.is_palindrome = Some(value.parse().map_err(|_| {
                    anyhow!("is_palindrome expects true|false, got {value:?}")
                })?);
            }
            "min_length" => {
                out.min_length = Some(parse_count("min_length", value)?);
            }
            "max_length" => {
                out.max_length = Some(parse_count("max_length", value)?);
            }
            "word_count" => {
                out.word_count = Some(parse_count("word_count", value)?);
            }
            "contains_character" => {
                out.contains_character = Some(value.to_string());
            }
            other => return Err(anyhow!("unknown filter key `{other}`")),
        }
    }
    Ok(out)
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| anyhow!("{key} expects a non-negative integer, got {value:?}"))
}

fn print_results(results: &[&Record]) {
    for record in results {
        print_record(record);
    }
    println!("{} match(es)", results.len());
}

fn print_record(record: &Record) {
    let p = &record.properties;
    println!(
        "  {} {:?}  len={} words={} unique={} palindrome={}",
        record.id[..12].dimmed(),
        record.value,
        p.length,
        p.word_count,
        p.unique_characters,
        p.is_palindrome,
    );
}

/// Split a line into tokens, honoring double quotes.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                if in_quotes {
                    tokens.push(std::mem::take(&mut current));
                }
                in_quotes = !in_quotes;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
