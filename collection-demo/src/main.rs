use anyhow::Context;
use clap::Parser;
use data_collection::{DataCollection, Interaction, Key, MountPoint, Sorting, data_collection};
use dataflow::{IdProvider, Lifetime, Store, relay};
use futures::StreamExt;
use log::info;
use shared::CollectionSettings;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "collection-demo")]
#[command(about = "Drive a person table through filter, sort, selection and patches")]
struct Cli {
    /// Collection settings (TOML, optionally under a [collection] table)
    #[arg(long, short)]
    settings: Option<PathBuf>,

    /// Text filter applied once the table is rendered
    #[arg(long, default_value = "a")]
    filter: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Person {
    id: u32,
    name: String,
    age: u32,
}

impl Person {
    fn new(id: u32, name: &str, age: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            age,
        }
    }
}

struct Row {
    text: String,
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<CollectionSettings> {
    let Some(path) = path else {
        return Ok(CollectionSettings::default());
    };
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    CollectionSettings::from_toml_str(&source)
        .with_context(|| format!("Invalid settings in {}", path.display()))
}

fn table() -> MountPoint<Person, Vec<Row>> {
    MountPoint::new(Vec::new(), |person: &Person, _index| Row {
        text: format!("#{:<3} {:<10} {:>3}", person.id, person.name, person.age),
    })
    .after_mount(|row: &Row, index| info!("mount   [{index}] {}", row.text))
    .before_unmount(|row: &Row, index| info!("unmount [{index}] {}", row.text))
}

fn print_table(title: &str, table: &MountPoint<Person, Vec<Row>>) {
    info!("{title} ({} rows)", table.len());
    for row in table.container() {
        info!("  {}", row.text);
    }
}

async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

async fn script(
    collection: &DataCollection<Person>,
    people: &Store<Vec<Person>>,
    filter: &str,
    lifetime: &Lifetime,
) {
    let by_name = Sorting::by_key(|p: &Person| p.name.clone());
    let by_age = Sorting::by_key(|p: &Person| p.age);
    let filter_by_name = collection.filter_by_text(|p: &Person| p.name.clone());
    let toggle_sorting = collection.toggle_sorting_handler();
    settle().await;

    info!("filter by '{filter}'");
    filter_by_name.call(filter.to_string());
    settle().await;

    info!("sort by name");
    toggle_sorting.call(by_name);
    settle().await;

    info!("sort by age, twice");
    toggle_sorting.call(by_age.clone());
    toggle_sorting.call(by_age);
    settle().await;

    info!("add Frances");
    people.update_with(|list| {
        let mut list = list.clone();
        list.push(Person::new(6, "Frances", 80));
        list
    });
    settle().await;

    info!("remove Alan");
    people.update_with(|list| list.iter().filter(|p| p.name != "Alan").cloned().collect());
    settle().await;

    let (interaction_relay, interaction_stream) = relay();
    interaction_relay.send(Interaction::KeyPressed(Key::Home));
    interaction_relay.send(Interaction::KeyPressed(Key::ArrowDown));
    interaction_relay.send(Interaction::KeyPressed(Key::Enter));
    interaction_relay.send(Interaction::KeyPressed(Key::End));
    interaction_relay.send(Interaction::KeyPressed(Key::Space));
    drop(interaction_relay);
    collection.handle_interactions(interaction_stream).await;

    lifetime.cancel();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.settings.as_ref())?;

    let people = Store::new(vec![
        Person::new(1, "Ada", 36),
        Person::new(2, "Grace", 85),
        Person::new(3, "Alan", 41),
        Person::new(4, "Edsger", 72),
        Person::new(5, "Barbara", 79),
        Person::new(7, "Katherine", 101),
    ]);
    let selected = Store::new(Vec::new());
    let collection = data_collection()
        .data(people.clone())
        .id_provider(IdProvider::by_key(|p: &Person| p.id))
        .multi_selection(selected.clone())
        .settings(settings)
        .build()?;

    let mut scroll_requests = collection.scroll_requests();
    let mut table = table();
    let lifetime = Lifetime::new();

    let (applied, ()) = futures::join!(
        table.run(collection.patches(), &lifetime),
        script(&collection, &people, &cli.filter, &lifetime)
    );

    info!("{applied} patch(es) applied");
    print_table("final table", &table);

    let selected_names: Vec<String> = selected.current().into_iter().map(|p| p.name).collect();
    info!("selected: {selected_names:?}");

    drop(collection);
    while let Some(request) = scroll_requests.next().await {
        info!("scroll into view: {} ({:?})", request.item.name, request.options.vertical);
    }
    Ok(())
}
