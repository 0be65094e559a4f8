use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, middleware, put, web, App, HttpResponse, HttpServer, Responder};

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use rs_haiku_core::io::list_files;
use rs_haiku_core::model::haiku_maker::HaikuMaker;

/// Struct representing query parameters for the `/v1/haiku` endpoint
#[derive(Deserialize)]
struct HaikuParams {
	seed: Option<u64>, // deterministic generator when present
	low_probability: Option<f64>,
	medium_probability: Option<f64>,
	max_attempts: Option<usize>, // 0 keeps retries unbounded
}

#[derive(Deserialize)]
struct VocabularyQuery {
	name: Option<String>,
}

struct SharedData {
	maker: HaikuMaker,
	vocabulary_name: String,
}

/// HTTP GET endpoint `/v1/haiku`
///
/// Generates one haiku from the currently loaded vocabulary, tuned by the
/// query parameters. Returns the three-line text as the response body.
/// A `seed` makes the response reproducible; without one the generator is
/// freshly seeded from the OS.
#[get("/v1/haiku")]
async fn get_haiku(data: web::Data<Mutex<SharedData>>, query: web::Query<HaikuParams>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Vocabulary lock failed"),
	};

	let mut input = shared_data.maker.make_generation_input();
	input.max_attempts = query.max_attempts.unwrap_or(0);
	if let Some(probability) = query.low_probability {
		if let Err(e) = input.set_low_probability(probability) {
			return HttpResponse::BadRequest().body(e);
		}
	}
	if let Some(probability) = query.medium_probability {
		if let Err(e) = input.set_medium_probability(probability) {
			return HttpResponse::BadRequest().body(e);
		}
	}

	let mut rng = match query.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};

	match shared_data.maker.make_str(&input, &mut rng) {
		Ok(haiku) => HttpResponse::Ok().body(haiku),
		Err(e) => HttpResponse::InternalServerError().body(e),
	}
}

/// HTTP GET endpoint `/v1/vocabularies`
///
/// Lists the vocabulary files available under `./data`.
#[get("/v1/vocabularies")]
async fn get_vocabularies() -> impl Responder {
	match list_files(&"./data".to_owned(), "json") {
		Ok(files) => HttpResponse::Ok().body(files.join("\n").replace(".json", "")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list vocabularies"),
	}
}

/// HTTP GET endpoint `/v1/loaded_vocabulary`
///
/// Returns the name of the vocabulary currently serving haikus
/// (`default` for the embedded one).
#[get("/v1/loaded_vocabulary")]
async fn get_loaded_vocabulary(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Vocabulary lock failed"),
	};
	HttpResponse::Ok().body(shared_data.vocabulary_name.clone())
}

/// HTTP PUT endpoint `/v1/load_vocabulary`
///
/// Swaps the serving vocabulary: `name=default` restores the embedded
/// dataset, any other name loads `./data/{name}.json` (writing its binary
/// cache on first load).
#[put("/v1/load_vocabulary")]
async fn put_vocabulary(data: web::Data<Mutex<SharedData>>, query: web::Query<VocabularyQuery>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Vocabulary lock failed"),
	};

	let name = match &query.name {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty vocabulary name"),
	};

	if name == "default" {
		shared_data.maker = HaikuMaker::default();
	} else {
		let vocabulary_path = format!("./data/{}.json", name);
		shared_data.maker = match HaikuMaker::new(&vocabulary_path) {
			Ok(m) => m,
			Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to load vocabulary: {e}")),
		};
	}
	shared_data.vocabulary_name = name.to_owned();
	info!("Loaded vocabulary '{name}'");

	HttpResponse::Ok().body("Vocabulary loaded successfully")
}

/// Main entry point for the server.
///
/// Starts on the embedded default vocabulary, wraps the maker in a
/// `Mutex` for thread safety, and serves the generation and vocabulary
/// endpoints over Actix-web with request logging and permissive CORS.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Generation with `max_attempts=0` has no internal bound; front ends
///   should impose their own request timeout.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let shared_data = SharedData {
		maker: HaikuMaker::default(),
		vocabulary_name: "default".to_owned(),
	};
	let shared_maker = web::Data::new(Mutex::new(shared_data));

	info!("Serving haikus on 127.0.0.1:5000");

	HttpServer::new(move || {
		App::new()
			.app_data(shared_maker.clone())
			.wrap(Cors::permissive())
			.wrap(middleware::Logger::default())
			.service(get_haiku)
			.service(get_vocabularies)
			.service(put_vocabulary)
			.service(get_loaded_vocabulary)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
