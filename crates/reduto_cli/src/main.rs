//! Reduto CLI entry point.
//!
//! # Responsibility
//! - Wire logging, storage and the directory client into the controller.
//! - Translate commands into controller operations with confirmation
//!   gates for destructive actions.

mod cli;

use clap::Parser;
use cli::{AddArgs, Cli, Command};
use log::warn;
use reduto_core::db::open_db;
use reduto_core::{
    init_logging, render_table, AddressLookup, KeyValueStore, MaskField, Notifier, RecordDraft,
    RegistrationService, SqliteKeyValueStore, SubmitOutcome, TerminalNotifier, ViaCepClient,
};
use std::io::{self, BufRead, Write};
use std::path::Path;
use uuid::Uuid;

fn main() {
    let cli = Cli::parse();
    std::process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    if let Some(log_dir) = &cli.log_dir {
        let absolute = absolutize(log_dir);
        if let Err(err) = init_logging(&cli.log_level, &absolute) {
            eprintln!("erro ao iniciar logging: {err}");
            return 1;
        }
    }

    let lookup = match ViaCepClient::new() {
        Ok(client) => client,
        Err(err) => {
            eprintln!("erro ao preparar consulta de CEP: {err}");
            return 1;
        }
    };

    // Standalone lookup needs no storage; resolve before opening the db.
    if let Command::Lookup { code } = &cli.command {
        return run_lookup(&lookup, code);
    }

    let conn = match open_db(&cli.db) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("erro ao abrir banco de dados: {err}");
            return 1;
        }
    };

    let kv = SqliteKeyValueStore::new(&conn);
    let mut service = RegistrationService::new(kv, lookup, TerminalNotifier);

    match cli.command {
        Command::Add(args) => run_add(&mut service, args),
        Command::List { search } => {
            print!("{}", render_table(&service.browse(&search)));
            0
        }
        Command::Delete { id, yes } => run_delete(&mut service, &id, yes),
        Command::Clear { yes } => {
            if !yes
                && !confirm(
                    "Tem certeza que deseja apagar TODOS os cadastros salvos localmente? \
                     Essa ação não pode ser desfeita.",
                )
            {
                return 0;
            }
            match service.clear_all() {
                Ok(()) => 0,
                Err(err) => {
                    eprintln!("erro ao limpar cadastros: {err}");
                    1
                }
            }
        }
        Command::Export { dir } => match service.export_to(&dir) {
            Ok(Some(path)) => {
                println!("{}", path.display());
                0
            }
            Ok(None) => 0,
            Err(err) => {
                eprintln!("erro ao exportar cadastros: {err}");
                1
            }
        },
        Command::Lookup { .. } => unreachable!("handled before storage setup"),
    }
}

fn run_add<S, L, N>(service: &mut RegistrationService<S, L, N>, args: AddArgs) -> i32
where
    S: KeyValueStore,
    L: AddressLookup,
    N: Notifier,
{
    // First pass at startup; the second models the deferred re-check for
    // an externally installed formatter.
    service.ensure_masks(args.raw_input);
    service.ensure_masks(args.raw_input);

    let mut draft = RecordDraft {
        tax_id: service.format_field(MaskField::TaxId, &args.tax_id),
        phone: service.format_field(MaskField::Phone, &args.phone),
        postal_code: service.format_field(MaskField::PostalCode, &args.postal_code),
        name: args.name,
        email: args.email,
        birth_date: args.birth_date,
        street: args.street,
        city: args.city,
        state: args.state,
        message: args.message,
    };

    let wants_autofill = !args.no_lookup
        && !draft.postal_code.is_empty()
        && (draft.street.is_empty() || draft.city.is_empty() || draft.state.is_empty());
    if wants_autofill {
        service.autofill_address(&mut draft);
    }

    match service.submit(&mut draft) {
        Ok(SubmitOutcome::Saved { id, total }) => {
            println!("Registro salvo: {id} (total: {total})");
            0
        }
        Ok(SubmitOutcome::Rejected(_)) => 1,
        Err(err) => {
            eprintln!("erro ao salvar cadastro: {err}");
            1
        }
    }
}

fn run_delete<S, L, N>(service: &mut RegistrationService<S, L, N>, id: &str, yes: bool) -> i32
where
    S: KeyValueStore,
    L: AddressLookup,
    N: Notifier,
{
    let id = match Uuid::parse_str(id) {
        Ok(id) => id,
        Err(_) => {
            eprintln!("id inválido: {id}");
            return 1;
        }
    };

    if !yes && !confirm("Excluir este cadastro?") {
        return 0;
    }

    match service.delete_record(id) {
        Ok(true) => 0,
        Ok(false) => {
            eprintln!("Registro não encontrado.");
            1
        }
        Err(err) => {
            eprintln!("erro ao excluir cadastro: {err}");
            1
        }
    }
}

fn run_lookup(lookup: &impl AddressLookup, code: &str) -> i32 {
    match lookup.by_postal_code(code) {
        Ok(Some(address)) => {
            println!(
                "{} - {} - {}/{}",
                address.street, address.neighborhood, address.city, address.state
            );
            0
        }
        Ok(None) => {
            println!("CEP não encontrado ou inválido.");
            0
        }
        Err(err) => {
            warn!("event=postal_lookup module=cli status=error error={err}");
            println!("CEP não encontrado ou inválido.");
            0
        }
    }
}

fn confirm(prompt: &str) -> bool {
    eprint!("{prompt} [s/N] ");
    let _ = io::stderr().flush();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}

fn absolutize(path: &Path) -> String {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    absolute.to_string_lossy().into_owned()
}
