use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use rs_chat_core::io::{get_filename, list_files, read_file};
use rs_chat_core::model::chat_input::ChatInput;
use rs_chat_core::model::follower_table::ModelBuilder;
use rs_chat_core::model::generator::Generator;
use rs_chat_core::tokenizer::{TokenConfig, Tokenizer};

/// Token budget applied when the request does not set one, so a model
/// with no reachable stopper cannot spin the endpoint forever.
const DEFAULT_MAX_TOKENS: usize = 10_000;

/// Struct representing query parameters for the `/v1/chat` endpoint
#[derive(Deserialize)]
struct ChatParams {
	lines: Option<usize>,
	width: Option<usize>,
	max_tokens: Option<usize>,
	seed: Option<u64> // seeds the RNG for reproducible output
}

#[derive(Deserialize)]
struct CorpusQuery {
	names: Option<String>
}

struct SharedData {
	generator: Option<Generator>,
	corpus_names: Vec<String>
}

impl ChatParams {
	/// Builds a validated `ChatInput` from the query parameters.
	fn chat_input(&self) -> Result<ChatInput, String> {
		let mut input = ChatInput::default();
		if let Some(lines) = self.lines {
			input.set_line_count(lines).map_err(|e| e.to_string())?;
		}
		if let Some(width) = self.width {
			input.set_line_width(width).map_err(|e| e.to_string())?;
		}
		input.max_tokens = Some(self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS));
		Ok(input)
	}
}

/// HTTP GET endpoint `/v1/chat`
///
/// Generates a chat from the currently loaded model based on query
/// parameters. Returns the generated text as the response body.
#[get("/v1/chat")]
async fn get_chat(data: web::Data<Mutex<SharedData>>, query: web::Query<ChatParams>) -> impl Responder {
	let input = match query.chat_input() {
		Ok(input) => input,
		Err(e) => return HttpResponse::BadRequest().body(e)
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let generator = match &shared_data.generator {
		Some(g) => g,
		None => return HttpResponse::BadRequest().body("No corpus loaded"),
	};

	let result = match query.seed {
		Some(seed) => generator.chat_with(&input, &mut StdRng::seed_from_u64(seed)),
		None => generator.chat(&input),
	};

	match result {
		Ok(text) => HttpResponse::Ok().body(text),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

#[get("/v1/corpora")]
async fn get_corpora() -> impl Responder {
	match list_files("./data", "txt") {
		Ok(files) => {
			let names: Vec<String> = files.iter().filter_map(|f| get_filename(f).ok()).collect();
			HttpResponse::Ok().body(names.join("\n"))
		}
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora")
	}
}

#[get("/v1/loaded_corpora")]
async fn get_loaded_corpora(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().body(shared_data.corpus_names.join("\n"))
}

/// HTTP PUT endpoint `/v1/load_corpora`
///
/// Tokenizes the named corpus files under `./data`, concatenates their
/// token streams, trains a fresh model and swaps it in.
#[put("/v1/load_corpora")]
async fn put_corpora(data: web::Data<Mutex<SharedData>>, query: web::Query<CorpusQuery>) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};

	let corpus_names: Vec<&str> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.collect();

	let tokenizer = Tokenizer::default();
	let mut tokens = Vec::new();
	for name in &corpus_names {
		let corpus_path = format!("./data/{}.txt", name);
		let text = match read_file(&corpus_path) {
			Ok(text) => text,
			Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to read corpus: {e}"))
		};
		tokens.extend(tokenizer.tokenize(&text));
	}

	let builder = match ModelBuilder::new(TokenConfig::default()) {
		Ok(b) => b,
		Err(e) => return HttpResponse::InternalServerError().body(e.to_string())
	};
	let table = match builder.train(&tokens) {
		Ok(t) => t,
		Err(e) => return HttpResponse::BadRequest().body(format!("Failed to train: {e}"))
	};
	info!("trained model from {} ({} contexts)", corpus_names.join(", "), table.len());

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.generator = Some(Generator::new(table));
	shared_data.corpus_names = corpus_names.iter().map(|s| s.to_string()).collect();

	HttpResponse::Ok().body("Corpora loaded successfully")
}

/// Main entry point for the server.
///
/// Starts with no model loaded; `PUT /v1/load_corpora` trains one from
/// the corpus files under `./data`.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - The data directory is hardcoded and should be made configurable.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let shared_data = SharedData {
		generator: None,
		corpus_names: Vec::new()
	};
	let shared_model = web::Data::new(Mutex::new(shared_data));

	info!("listening on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.service(get_chat)
			.service(get_corpora)
			.service(put_corpora)
			.service(get_loaded_corpora)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
