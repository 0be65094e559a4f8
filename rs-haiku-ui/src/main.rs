use std::time::Duration;

use eframe::{egui, Frame};
use egui::Context;

use reqwest::blocking::Client;
use reqwest::Result;

/// REST context holding a reusable blocking HTTP client.
struct RESTContext {
    client: Client,
}

impl RESTContext {
    /// Creates a new REST context with a timeout.
    fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::new(5, 0))
            .build()?;
        Ok(Self { client })
    }

    /// Sends a GET request to `/v1/haiku` with query parameters.
    fn get_haiku(&self, params: &[(String, String)]) -> Result<String> {
        let response = self.client
            .get("http://127.0.0.1:5000/v1/haiku")
            .query(params)
            .send()?
            .error_for_status()?;

        Ok(response.text()?)
    }

    /// Sends a GET request to `/v1/vocabularies`.
    fn get_vocabularies(&self) -> Result<String> {
        let response = self.client
            .get("http://127.0.0.1:5000/v1/vocabularies")
            .send()?
            .error_for_status()?;

        Ok(response.text()?)
    }

    /// Sends a GET request to `/v1/loaded_vocabulary`.
    fn get_loaded_vocabulary(&self) -> Result<String> {
        let response = self.client
            .get("http://127.0.0.1:5000/v1/loaded_vocabulary")
            .send()?
            .error_for_status()?;

        Ok(response.text()?)
    }

    /// Sends a PUT request to `/v1/load_vocabulary` with the name.
    fn put_load_vocabulary(&self, name: &str) -> Result<String> {
        let response = self.client
            .put("http://127.0.0.1:5000/v1/load_vocabulary")
            .query(&[("name", name)])
            .send()?
            .error_for_status()?;

        Ok(response.text()?)
    }
}

/// Global UI state (MUST persist between frames in egui).
struct HaikuUI {
    rest: RESTContext,
    last_haiku: Option<String>,

    selected_vocabulary: String,      // vocabulary currently loaded on the server
    available_vocabularies: Vec<String>, // list of server-side vocabularies

    low_probability: f64,
    medium_probability: f64,

    use_max_attempts: bool,
    max_attempts: usize,

    use_seed: bool,
    seed: u64,
}

impl HaikuUI {
    /// Initializes the UI with the default generation settings.
    fn new() -> Result<Self> {
        let mut ui = Self {
            rest: RESTContext::new()?,
            last_haiku: None,

            selected_vocabulary: "default".to_owned(),
            available_vocabularies: Vec::new(),

            low_probability: 0.2,
            medium_probability: 0.5,

            use_max_attempts: false,
            max_attempts: 10_000,

            use_seed: false,
            seed: 42,
        };
        ui.get_vocabularies();
        ui.get_loaded_vocabulary();
        Ok(ui)
    }

    /// Builds the query parameters for the API.
    ///
    /// max_attempts = 0 is sent when the cap checkbox is disabled, keeping
    /// the server on unbounded retries; the seed is only sent when fixed.
    fn build_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        params.push(("low_probability".into(), self.low_probability.to_string()));
        params.push(("medium_probability".into(), self.medium_probability.to_string()));

        params.push((
            "max_attempts".into(),
            if self.use_max_attempts {
                self.max_attempts.to_string()
            } else {
                "0".into()
            },
        ));

        if self.use_seed {
            params.push(("seed".into(), self.seed.to_string()));
        }

        params
    }

    /// Performs the generation request.
    fn get_haiku(&mut self) {
        let params = self.build_query();
        match self.rest.get_haiku(&params) {
            Ok(haiku) => self.last_haiku = Some(haiku),
            Err(e) => self.last_haiku = Some(format!("Error: {e}")),
        }
    }

    /// Performs the vocabulary listing request.
    ///
    /// The embedded default is always selectable, on top of whatever the
    /// server finds under its data directory.
    fn get_vocabularies(&mut self) {
        match self.rest.get_vocabularies() {
            Ok(listing) => {
                let mut vocabularies = vec!["default".to_owned()];
                vocabularies.extend(
                    listing
                        .split('\n')
                        .map(|s| s.trim().to_owned())
                        .filter(|s| !s.is_empty()),
                );
                self.available_vocabularies = vocabularies;
            }
            Err(e) => self.last_haiku = Some(format!("Error: {e}")),
        }
    }

    /// Performs the loaded vocabulary request.
    fn get_loaded_vocabulary(&mut self) {
        match self.rest.get_loaded_vocabulary() {
            Ok(name) => self.selected_vocabulary = name.trim().to_owned(),
            Err(e) => self.last_haiku = Some(format!("Error: {e}")),
        }
    }

    /// Performs the load vocabulary request.
    fn put_load_vocabulary(&mut self, name: String) {
        match self.rest.put_load_vocabulary(&name) {
            Ok(_) => self.selected_vocabulary = name,
            Err(e) => self.last_haiku = Some(format!("Error: {e}")),
        }
    }
}

impl eframe::App for HaikuUI {
    /// UI update loop (called every frame).
    fn update(&mut self, ctx: &Context, _: &mut Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {

            egui::Grid::new("haiku_grid")
                .num_columns(2)
                .spacing([20.0, 6.0])
                .striped(true)
                .show(ui, |ui| {

                    // low probability (rare structural events)
                    ui.label("Low probability");
                    ui.add(
                        egui::DragValue::new(&mut self.low_probability)
                            .range(0.0..=1.0)
                            .speed(0.01),
                    );
                    ui.end_row();

                    // medium probability (common structural events)
                    ui.label("Medium probability");
                    ui.add(
                        egui::DragValue::new(&mut self.medium_probability)
                            .range(0.0..=1.0)
                            .speed(0.01),
                    );
                    ui.end_row();

                    // max_attempts checkbox + value
                    ui.checkbox(&mut self.use_max_attempts, "Cap retry attempts");
                    if self.use_max_attempts {
                        ui.add(
                            egui::DragValue::new(&mut self.max_attempts)
                                .range(1..=1_000_000)
                                .speed(100),
                        );
                    } else {
                        ui.label("Retries not bounded");
                    }
                    ui.end_row();

                    // seed checkbox + value
                    ui.checkbox(&mut self.use_seed, "Fixed seed");
                    if self.use_seed {
                        ui.add(
                            egui::DragValue::new(&mut self.seed)
                                .speed(1),
                        );
                    } else {
                        ui.label("Seeded from the OS");
                    }
                    ui.end_row();

                    ui.separator();
                    ui.end_row();

                    // Generate button
                    if ui
                        .add_sized([200.0, 40.0], egui::Button::new("Generate"))
                        .clicked()
                    {
                        self.get_haiku();
                    }

                    // Output: the three lines of the last haiku
                    if let Some(haiku) = &self.last_haiku {
                        ui.label(haiku);
                    } else {
                        ui.label("Click Generate to start");
                    }

                    ui.end_row();
                });

            // Vocabulary selection (one loaded at a time)
            ui.separator();
            ui.label("Vocabulary");

            let mut selected = self.selected_vocabulary.clone();
            let mut selection_changed = false;
            for vocabulary in &self.available_vocabularies {
                if ui
                    .radio_value(&mut selected, vocabulary.clone(), vocabulary)
                    .changed()
                {
                    selection_changed = true;
                }
            }

            if selection_changed && selected != self.selected_vocabulary {
                self.put_load_vocabulary(selected);
            }
        });
    }
}

/// Application entry point.
fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([440.0, 420.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "rs-haiku",
        options,
        Box::new(|_| Ok(Box::new(HaikuUI::new()?))),
    )
}
