use actix_cors::Cors;
use actix_web::{
    get,
    middleware::{self, Condition},
    route,
    web::{self, Data},
    App, HttpResponse, HttpServer, Responder,
};
use actix_web_lab::respond::Html;
use clap::Parser;
use contactbook::{
    app::{app::App as ContactbookApp, options::AppOptions, request_manager::RequestManager},
    i18n::i18n::Language,
    location::{Coordinates, LocationSource},
    storage::StorageEngine,
};
use juniper::http::{graphiql::graphiql_source, GraphQLRequest};
use std::sync::Mutex;
use std::{io, sync::Arc};

use crate::schema::{create_schema, GraphQLContext, Schema};

mod schema;
mod tracers;

/// GraphiQL playground UI
#[get("/graphiql")]
async fn graphql_playground() -> impl Responder {
    Html(graphiql_source("/graphql", None))
}

/// GraphQL endpoint -- triggered once per request
#[route("/graphql", method = "GET", method = "POST")]
async fn graphql(
    schema: web::Data<Schema>,
    request_manager_ref: web::Data<RequestManager>,
    data: web::Json<GraphQLRequest>,
) -> impl Responder {
    let request_manager = request_manager_ref.as_ref();

    let graphql_context = GraphQLContext {
        request_manager: Mutex::new(request_manager.clone()),
    };

    let response = data.execute(&schema, &graphql_context).await;

    HttpResponse::Ok().json(response)
}

/// 📇 Contactbook GraphQL Server, drives the contactbook app over GraphQL
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

    /// Port the graphql server will run on
    #[clap(short, long, default_value = "9000")]
    port: u16,

    /// Address the graphql server will run on
    #[clap(short, long, default_value = "0.0.0.0")]
    address: String,

    /// Logs every HTTP request
    #[clap(long)]
    log_http: bool,

    #[clap(long, default_value_t = 2)]
    http_workers: usize,

    /// Prints timings of contact search and pagination
    #[clap(long)]
    trace: bool,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    if args.trace {
        tracers::init_tracing_subscriber();
    }

    let storage_engine = match args.memory {
        true => StorageEngine::Memory,
        false => StorageEngine::File(args.data.clone()),
    };

    let location_source = match args.location {
        Some(coordinates) => LocationSource::Fixed(coordinates),
        None => LocationSource::Unsupported,
    };

    let app_options = AppOptions::default()
        .set_storage_engine(storage_engine)
        .set_language(args.language)
        .set_location_source(location_source);

    let request_manager = ContactbookApp::spawn(app_options)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    // Set up Ctrl-C handler
    let set_handler_request_manager_clone = request_manager.clone();

    ctrlc::set_handler(move || {
        match set_handler_request_manager_clone.send_shutdown_request() {
            Ok(shutdown_response) => log::info!("Shutting down server: {}", shutdown_response),
            Err(err) => log::error!("Unable to shut down app: {}", err),
        }

        std::process::exit(0);
    })
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    // Create Juniper schema
    let schema = Arc::new(create_schema());

    log::info!("starting HTTP server on port {}.", args.port);

    log::info!(
        "GraphiQL playground: http://{}:{}/graphiql",
        args.address,
        args.port
    );

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(Data::from(schema.clone()))
            .app_data(web::Data::new(request_manager.clone()))
            .service(graphql)
            .service(graphql_playground)
            .wrap(Cors::permissive())
            .wrap(Condition::new(args.log_http, middleware::Logger::default()))
    })
    .workers(args.http_workers)
    .bind((args.address, args.port))?
    .run()
    .await
}
