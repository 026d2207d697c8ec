use crate::config::StoreConfig;
use crate::db::AnimalShelter;
use clap::{Arg, Command};
use mongodb::bson::{Document, doc};

pub fn cli() -> Command {
    Command::new("shelterdata")
        .subcommand(Command::new("ping").about("Check that the record store is reachable"))
        .subcommand(
            Command::new("seed")
                .about("Insert sample animal records into the collection")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .help("JSON file holding an array of records (built-in samples if omitted)")
                        .value_name("FILE"),
                ),
        )
}

pub async fn handle_cli() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("ping", _)) => {
            let store = open_store().await?;
            println!("Record store is reachable");
            println!("Database: {}", store.database().name());
            println!("Collection: {}", store.collection_name());
        }
        Some(("seed", sub_matches)) => {
            let records = match sub_matches.get_one::<String>("file") {
                Some(path) => {
                    let raw = std::fs::read_to_string(path)?;
                    serde_json::from_str::<Vec<Document>>(&raw)?
                }
                None => sample_animals(),
            };

            let store = open_store().await?;
            let total = records.len();
            for record in records {
                store.create(record).await?;
            }

            println!("Inserted {} records", total);
        }
        _ => {
            cli().print_help()?;
        }
    }

    Ok(())
}

async fn open_store() -> Result<AnimalShelter, Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env();

    Ok(AnimalShelter::connect(&config).await?)
}

fn sample_animals() -> Vec<Document> {
    vec![
        doc! {
            "name": "Fido",
            "species": "dog",
            "breed": "Labrador Retriever Mix",
            "age_upon_outcome": "2 years",
            "outcome_type": "Adoption"
        },
        doc! {
            "name": "Bella",
            "species": "dog",
            "breed": "German Shepherd",
            "age_upon_outcome": "4 years",
            "outcome_type": "Transfer"
        },
        doc! {
            "name": "Whiskers",
            "species": "cat",
            "breed": "Domestic Shorthair Mix",
            "age_upon_outcome": "1 year",
            "outcome_type": "Adoption"
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_samples_are_valid_create_inputs() {
        let samples = sample_animals();

        assert!(!samples.is_empty());
        assert!(samples.iter().all(|record| !record.is_empty()));
    }

    #[test]
    fn seed_file_format_is_a_json_array_of_records() {
        let raw = r#"[{"name":"Rex","species":"dog"},{"name":"Mittens","species":"cat"}]"#;
        let records: Vec<Document> = serde_json::from_str(raw).expect("well-formed seed file");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get_str("name").unwrap(), "Rex");
    }
}
