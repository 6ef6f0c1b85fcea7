use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use kaikki_glossary::{Extractor, LemmaAssembler, LineSource, ReadMode, ReadingStrategy};
use kaikki_pos::{PosTable, SkippedPos};
use kaikki_types::SourceRecord;

fn main() -> Result<()> {
    let usage = "usage: cargo run -p kaikki-glossary --example survey -- <kaikki.jsonl> <target_iso> [source_iso]";
    let mut args = env::args().skip(1);
    let path = args.next().map(PathBuf::from).context(usage)?;
    let target_iso = args.next().context(usage)?;
    let source_iso = args.next().unwrap_or_default();

    // An empty table reports every tag the extract uses.
    let pos_table = PosTable::default();
    let assembler = LemmaAssembler::new(
        Extractor::new(target_iso, ReadingStrategy::for_language(&source_iso)),
        &pos_table,
    );
    let mut pos_tags = SkippedPos::default();

    let mut records = 0usize;
    let mut rows = 0usize;
    let mut glosses = 0usize;
    let mut form_of_senses = 0usize;
    let mut samples = Vec::new();

    let source = LineSource::open(&path, ReadMode::Mmap)
        .with_context(|| format!("opening {}", path.display()))?;
    for (idx, line) in source.enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let record: SourceRecord = serde_json::from_str(&line)
            .with_context(|| format!("parsing line {}", idx + 1))?;
        records += 1;
        form_of_senses += record
            .senses
            .iter()
            .flatten()
            .filter(|s| s.is_form_of())
            .count();
        if let Some(row) = assembler.assemble(&record, &mut pos_tags) {
            rows += 1;
            glosses += row.glosses.len();
            if samples.len() < 5 {
                samples.push(row);
            }
        }
    }

    println!("Extract      : {}", path.display());
    println!("Records      : {}", records);
    println!("Rows         : {}", rows);
    println!("Glosses      : {}", glosses);
    println!("Form-of senses: {}", form_of_senses);
    println!("Part-of-speech tags in emitted rows:");
    for (tag, count) in pos_tags.sorted() {
        println!("  {tag}: {count}");
    }
    for row in &samples {
        println!("{}", serde_json::to_string(row)?);
    }

    Ok(())
}
