//! Load and print a single descriptor file

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use crystals_core::{
    ActorDescriptor, ContentItem, ContentScript, Descriptor, DescriptorKind, DialogDescriptor,
    MapDescriptor,
};

use crate::utils::ContentArgs;

/// Load one descriptor file and print it
#[derive(Parser)]
pub struct Inspect {
    /// Descriptor kind (map, dialog, actor); detected from the root element when omitted
    #[arg(short, long, value_name = "KIND")]
    kind: Option<DescriptorKind>,

    /// File to load, relative to the content directory
    #[arg(value_name = "FILE")]
    file: String,

    #[command(flatten)]
    content: ContentArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Summary view (names, counts, scripts)
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let factory = self.content.factory()?;
        let file = self.file.as_str();

        let descriptor: Descriptor = match self.kind {
            Some(DescriptorKind::Map) => factory.load_map(file)?.into(),
            Some(DescriptorKind::Dialog) => factory.load_dialog(file)?.into(),
            Some(DescriptorKind::Actor) => factory.load_actor(file)?.into(),
            None => factory.load_any(file)?.with_context(|| {
                format!("{file} is not a map, dialog or actor file; pass --kind to force one")
            })?,
        };

        match self.format {
            OutputFormat::Summary => print_summary(&descriptor),
            OutputFormat::Json => print_json(&descriptor)?,
            OutputFormat::Debug => println!("{:#?}", descriptor),
        }

        Ok(())
    }
}

fn print_summary(descriptor: &Descriptor) {
    println!(
        "{} {} ({})",
        style("File:").bold().cyan(),
        descriptor.filename(),
        descriptor.kind()
    );
    println!();

    match descriptor {
        Descriptor::Map(map) => print_map(map),
        Descriptor::Dialog(dialog) => print_dialog(dialog),
        Descriptor::Actor(actor) => print_actor(actor),
    }
}

fn print_map(map: &MapDescriptor) {
    println!("{}", style("=== Map ===").bold().green());
    println!("  Name: {}", map.name);
    println!("  Ground: {}", map.ground);
    println!("  Start: {}", map.start_position);
    println!();

    println!("{}", style("Objects:").bold().yellow());
    for placement in &map.objects {
        println!("  {} at {}", placement.filename, placement.position);
    }
    println!();

    println!("{}", style("Actors:").bold().yellow());
    for placement in &map.actors {
        println!("  {} at {}", placement.filename, placement.position);
    }
}

fn print_dialog(dialog: &DialogDescriptor) {
    let reqs = &dialog.requirements;

    println!("{}", style("=== Requirements ===").bold().green());
    if reqs.is_empty() {
        println!("  (none)");
    }
    for event in &reqs.events {
        println!("  event: {}", event);
    }
    for quest in &reqs.quests {
        println!("  quest: {} = {}", quest.quest, quest.state);
    }
    for (tag, extra) in &reqs.extra {
        println!("  {}: {} {:?}", tag, extra.text, extra.attributes);
    }
    println!();

    println!("{}", style("=== Content ===").bold().green());
    print_script(&dialog.content);

    for (id, script) in &dialog.subcontent {
        println!();
        println!("{}", style(format!("=== Subcontent '{id}' ===")).bold().green());
        print_script(script);
    }
}

fn print_script(script: &ContentScript) {
    for item in script {
        match item {
            ContentItem::Say { speaker, text } => println!("  {}: {}", style(speaker).bold(), text),
            ContentItem::Goto { target } => println!("  -> {}", target),
            ContentItem::SetFlag {
                kind,
                value,
                attributes,
            } => {
                if attributes.is_empty() {
                    println!("  set {} {}", kind, value);
                } else {
                    println!("  set {} {} {:?}", kind, value, attributes);
                }
            }
            ContentItem::Choices { speaker, options } => {
                match speaker {
                    Some(who) => println!("  {} offers:", style(who).bold()),
                    None => println!("  choices:"),
                }
                for option in options {
                    println!("    [{}] {}", option.id, option.label);
                }
            }
        }
    }
}

fn print_actor(actor: &ActorDescriptor) {
    println!("{}", style("=== Actor ===").bold().green());
    println!("  Name: {}", actor.name);
    println!("  Image set: {}", actor.imageset);
    println!();

    println!("{}", style("Dialogs:").bold().yellow());
    for dialog in &actor.dialogs {
        println!("  {}", dialog);
    }
}

fn print_json(descriptor: &Descriptor) -> Result<()> {
    let json =
        serde_json::to_string_pretty(descriptor).context("Failed to serialize descriptor to JSON")?;
    println!("{}", json);
    Ok(())
}
