use address_book::utils::{logger, validation::Validate};
use address_book::{
    config::resolve_storage_path, export_delimited, AddressBook, AddressBookError, CliConfig,
    Command, Contact, LocalStorage, Outcome, SortOrder, Storage, TomlConfig,
};
use clap::Parser;

fn main() {
    let cli = CliConfig::parse();

    // 設定檔載入失敗時仍需初始化日誌，才能回報錯誤
    let config = TomlConfig::from_file_or_default(&cli.config);
    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();

    if logging.json {
        logger::init_json_logger(logging.level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose || logging.verbose, logging.level.as_deref());
    }

    tracing::debug!("CLI config: {:?}", cli);

    let exit_code = match config.and_then(|config| run(&cli, &config)) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            e.exit_code()
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: &CliConfig, config: &TomlConfig) -> Result<i32, AddressBookError> {
    cli.validate()?;
    config.validate()?;

    let path = resolve_storage_path(cli.file.as_deref(), config);
    tracing::debug!("Using contacts file: {}", path);

    let mut book = AddressBook::open(LocalStorage::new(path))?;

    match &cli.command {
        Command::List { sort, desc } => {
            let contacts: Vec<&Contact> = match sort {
                Some(field) => {
                    let order = if *desc {
                        SortOrder::Descending
                    } else {
                        SortOrder::Ascending
                    };
                    book.sorted(*field, order)
                }
                None => book.contacts().iter().collect(),
            };
            print_contacts(&contacts);
            Ok(0)
        }
        Command::Add {
            name,
            phone,
            email,
            address,
        } => Ok(report(book.add(name, phone, email, address)?)),
        Command::Update {
            name,
            phone,
            email,
            address,
        } => Ok(report(book.update(
            name,
            phone.as_deref(),
            email.as_deref(),
            address.as_deref(),
        )?)),
        Command::Delete { name } => Ok(report(book.delete(name)?)),
        Command::Search { query, field } => {
            let field = match field {
                Some(field) => *field,
                None => config.default_search_field()?,
            };
            let found = book.search(query, field);
            tracing::info!("🔍 {} match(es) for '{}' in {}", found.len(), query, field);
            print_contacts(&found);
            Ok(0)
        }
        Command::Export { format, output } => {
            let contacts: Vec<&Contact> = book.contacts().iter().collect();
            let content = export_delimited(&contacts, *format)?;
            match output {
                Some(path) => {
                    LocalStorage::new(path).write(content.as_bytes())?;
                    println!("✅ Exported {} contacts to {}", contacts.len(), path);
                }
                None => print!("{}", content),
            }
            Ok(0)
        }
    }
}

fn report(outcome: Outcome) -> i32 {
    if outcome.ok {
        println!("✅ {}", outcome.message);
        0
    } else {
        eprintln!("❌ {}", outcome.message);
        1
    }
}

fn print_contacts(contacts: &[&Contact]) {
    if contacts.is_empty() {
        println!("(no contacts)");
        return;
    }

    println!("{:<10}  {:<15}  {:<20}  {}", "NAME", "PHONE", "EMAIL", "ADDRESS");
    for contact in contacts {
        println!(
            "{:<10}  {:<15}  {:<20}  {}",
            contact.name, contact.phone, contact.email, contact.address
        );
    }
}
