use std::io::{self, BufRead, Write};

use clap::Parser;
use contactbook::{
    app::{app::App, event::Event, options::AppOptions, request_manager::RequestManager},
    i18n::i18n::Language,
    location::{Coordinates, LocationSource},
    profile::avatar::FileUpload,
    shell::{
        command::{Command, HELP},
        render::{render, render_event_result},
    },
    storage::StorageEngine,
};

/// 📇 Contactbook shell, browse and edit contacts from the terminal
#[derive(Parser, Debug)]
struct Cli {
    /// Directory holding local storage. Note: Does not support shell paths, e.g. ~
    #[clap(short, long, default_value = "data")]
    data: std::path::PathBuf,

    /// Keep local storage in memory only
    #[clap(long)]
    memory: bool,

    /// Display language (en or th)
    #[clap(short, long, default_value = "en")]
    language: Language,

    /// Position reported to the location panel, as <latitude>,<longitude>
    #[clap(long)]
    location: Option<Coordinates>,

    /// Fixes the generated contacts
    #[clap(long)]
    seed: Option<u64>,
}

impl Cli {
    fn to_options(&self) -> AppOptions {
        let storage_engine = match self.memory {
            true => StorageEngine::Memory,
            false => StorageEngine::File(self.data.clone()),
        };

        let location_source = match self.location {
            Some(coordinates) => LocationSource::Fixed(coordinates),
            None => LocationSource::Unsupported,
        };

        AppOptions::default()
            .set_storage_engine(storage_engine)
            .set_language(self.language)
            .set_location_source(location_source)
            .set_seed(self.seed)
    }
}

fn show(request_manager: &RequestManager) {
    match request_manager.send_screen_request() {
        Ok(screen) => println!("\n{}", render(&screen)),
        Err(err) => log::error!("Unable to fetch screen: {}", err),
    }
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    let request_manager = match App::spawn(args.to_options()) {
        Ok(request_manager) => request_manager,
        Err(err) => {
            log::error!("Unable to start contactbook: {}", err);
            std::process::exit(1);
        }
    };

    show(&request_manager);

    let stdin = io::stdin();

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();

        match stdin.lock().read_line(&mut line) {
            // EOF
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                log::error!("Unable to read input: {}", err);
                break;
            }
        }

        let event = match line.parse::<Command>() {
            Ok(Command::Event(event)) => event,
            Ok(Command::Upload { path, mime_type }) => match FileUpload::from_path(path, mime_type)
            {
                Ok(upload) => Event::UploadAvatar(upload),
                Err(err) => {
                    println!("{}", err);
                    continue;
                }
            },
            Ok(Command::Show) => {
                show(&request_manager);
                continue;
            }
            Ok(Command::Help) => {
                println!("{}", HELP);
                continue;
            }
            Ok(Command::Quit) => break,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };

        match request_manager.send_event(event) {
            Ok(result) => {
                if let Some(message) = render_event_result(&result) {
                    println!("{}", message);
                }

                show(&request_manager);
            }
            Err(err) => log::error!("Request failed: {}", err),
        }
    }

    match request_manager.send_shutdown_request() {
        Ok(status) => log::info!("{}", status),
        Err(err) => log::error!("Unable to shut down cleanly: {}", err),
    }
}
