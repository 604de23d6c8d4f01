//! The widget's state: search text, loading and error flags, the last reading
//! and its day/night flag.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    error::WidgetError,
    model::WeatherReading,
    presentation,
    provider::WeatherProvider,
    view::WidgetView,
};

/// A submission accepted by [`WeatherWidget::begin_search`].
///
/// Carries the token that decides whether its result is still wanted once the
/// fetch resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    token: u64,
    query: String,
}

impl SearchTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Trimmed, non-empty location to fetch.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// What happened to a fetch result handed to [`WeatherWidget::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// A reading was stored.
    Updated,
    /// The fetch failed and the error is now shown.
    Failed,
    /// A newer search was started since this ticket; the result was dropped.
    Stale,
}

#[derive(Debug)]
pub struct WeatherWidget {
    provider: Arc<dyn WeatherProvider>,
    input: String,
    reading: Option<WeatherReading>,
    error: Option<WidgetError>,
    is_loading: bool,
    is_day_time: bool,
    latest_token: u64,
}

impl WeatherWidget {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            input: String::new(),
            reading: None,
            error: None,
            is_loading: false,
            is_day_time: true,
            latest_token: 0,
        }
    }

    /// Shared handle to the provider, for hosts that drive fetches themselves.
    pub fn provider(&self) -> Arc<dyn WeatherProvider> {
        Arc::clone(&self.provider)
    }

    /// Replace the search text. No validation happens here.
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn reading(&self) -> Option<&WeatherReading> {
        self.reading.as_ref()
    }

    pub fn error(&self) -> Option<WidgetError> {
        self.error
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_day_time(&self) -> bool {
        self.is_day_time
    }

    /// Validate the input and, if it is usable, mark the widget loading and
    /// hand out a ticket for the fetch.
    ///
    /// Blank input sets [`WidgetError::InvalidLocation`], clears any reading
    /// and returns `None`. It still counts as a submission, so any search in
    /// flight is superseded.
    pub fn begin_search(&mut self) -> Option<SearchTicket> {
        self.latest_token += 1;

        let query = self.input.trim();
        if query.is_empty() {
            self.error = Some(WidgetError::InvalidLocation);
            self.reading = None;
            self.is_loading = false;
            return None;
        }

        let ticket = SearchTicket { token: self.latest_token, query: query.to_owned() };

        self.error = None;
        self.is_loading = true;
        info!(token = ticket.token, query = %ticket.query, "Searching current weather");

        Some(ticket)
    }

    /// Apply the outcome of the fetch started for `ticket`.
    ///
    /// Results for anything but the most recent ticket are discarded so the
    /// last submission wins regardless of response order.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        result: anyhow::Result<WeatherReading>,
    ) -> Completion {
        if ticket.token != self.latest_token {
            warn!(
                token = ticket.token,
                latest = self.latest_token,
                "Discarding result of superseded search"
            );
            return Completion::Stale;
        }

        self.is_loading = false;

        match result {
            Ok(reading) => {
                if presentation::local_hour(&reading.local_time).is_none() {
                    warn!(local_time = %reading.local_time, "Unrecognised local time, showing night");
                }
                self.is_day_time = presentation::is_day_time(&reading.local_time);
                self.reading = Some(reading);
                Completion::Updated
            }
            Err(err) => {
                error!(query = %ticket.query, "Error fetching weather data: {err:#}");
                self.error = Some(WidgetError::CityNotFound);
                self.reading = None;
                Completion::Failed
            }
        }
    }

    /// Validate, fetch and apply in one go. Returns `None` when the input was
    /// rejected before any request was made.
    pub async fn search(&mut self) -> Option<Completion> {
        let ticket = self.begin_search()?;
        let result = self.provider.current(ticket.query()).await;
        Some(self.complete(ticket, result))
    }

    pub fn view(&self) -> WidgetView {
        WidgetView::from_widget(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TemperatureUnit;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::{
        collections::VecDeque,
        sync::{
            Mutex,
            atomic::{AtomicUsize, Ordering},
        },
    };

    /// Replays queued results and records how often it was asked.
    #[derive(Debug, Default)]
    struct ScriptedProvider {
        results: Mutex<VecDeque<anyhow::Result<WeatherReading>>>,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn with(results: Vec<anyhow::Result<WeatherReading>>) -> Arc<Self> {
            Arc::new(Self { results: Mutex::new(results.into()), calls: AtomicUsize::new(0) })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WeatherProvider for ScriptedProvider {
        async fn current(&self, _location: &str) -> anyhow::Result<WeatherReading> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(anyhow!("no scripted result left")))
        }
    }

    fn reading(temperature: f64, local_time: &str) -> WeatherReading {
        WeatherReading {
            temperature,
            description: "Sunny".into(),
            location: "Lisbon".into(),
            unit: TemperatureUnit::Celsius,
            local_time: local_time.into(),
        }
    }

    #[test]
    fn starts_idle_in_daylight_with_nothing_shown() {
        let widget = WeatherWidget::new(ScriptedProvider::with(vec![]));

        assert_eq!(widget.input(), "");
        assert!(widget.reading().is_none());
        assert!(widget.error().is_none());
        assert!(!widget.is_loading());
        assert!(widget.is_day_time());
    }

    #[tokio::test]
    async fn blank_input_is_rejected_without_a_request() {
        let provider = ScriptedProvider::with(vec![Ok(reading(21.0, "2024-06-01 12:00"))]);
        let mut widget = WeatherWidget::new(provider.clone());

        widget.set_input("Lisbon");
        assert_eq!(widget.search().await, Some(Completion::Updated));
        assert!(widget.reading().is_some());

        for blank in ["", "   ", "\t\n"] {
            widget.set_input(blank);
            assert_eq!(widget.search().await, None);
            assert_eq!(widget.error(), Some(WidgetError::InvalidLocation));
            assert!(widget.reading().is_none());
            assert!(!widget.is_loading());
        }

        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn begin_search_trims_and_marks_loading() {
        let mut widget = WeatherWidget::new(ScriptedProvider::with(vec![]));
        widget.set_input("  New York  ");

        let ticket = widget.begin_search().expect("input is valid");

        assert_eq!(ticket.query(), "New York");
        assert!(widget.is_loading());
        assert!(widget.error().is_none());
        // raw input is left as typed
        assert_eq!(widget.input(), "  New York  ");
    }

    #[tokio::test]
    async fn success_stores_reading_and_recomputes_daylight() {
        let provider = ScriptedProvider::with(vec![Ok(reading(-5.0, "2024-06-01 20:00"))]);
        let mut widget = WeatherWidget::new(provider);

        widget.set_input("Lisbon");
        assert_eq!(widget.search().await, Some(Completion::Updated));

        assert_eq!(widget.reading().map(|r| r.temperature), Some(-5.0));
        assert!(!widget.is_day_time());
        assert!(!widget.is_loading());
        assert!(widget.error().is_none());
    }

    #[tokio::test]
    async fn failure_clears_reading_and_shows_city_not_found() {
        let provider = ScriptedProvider::with(vec![
            Ok(reading(12.0, "2024-06-01 07:00")),
            Err(anyhow!("City not found: status 400")),
            Err(anyhow!("Failed to parse WeatherAPI current JSON")),
        ]);
        let mut widget = WeatherWidget::new(provider);
        widget.set_input("Lisbon");

        widget.search().await;
        assert!(widget.reading().is_some());

        for _ in 0..2 {
            assert_eq!(widget.search().await, Some(Completion::Failed));
            assert_eq!(widget.error(), Some(WidgetError::CityNotFound));
            assert!(widget.reading().is_none());
            assert!(!widget.is_loading());
        }
    }

    #[tokio::test]
    async fn next_search_clears_previous_error() {
        let provider = ScriptedProvider::with(vec![
            Err(anyhow!("boom")),
            Ok(reading(25.0, "2024-06-01 09:00")),
        ]);
        let mut widget = WeatherWidget::new(provider);
        widget.set_input("Lisbon");

        widget.search().await;
        assert!(widget.error().is_some());

        widget.search().await;
        assert!(widget.error().is_none());
        assert!(widget.reading().is_some());
    }

    #[test]
    fn superseded_result_is_discarded() {
        let mut widget = WeatherWidget::new(ScriptedProvider::with(vec![]));

        widget.set_input("Paris");
        let first = widget.begin_search().unwrap();
        widget.set_input("Tokyo");
        let second = widget.begin_search().unwrap();
        assert!(second.token() > first.token());

        let mut tokyo = reading(18.0, "2024-06-01 23:00");
        tokyo.location = "Tokyo".into();
        assert_eq!(widget.complete(second, Ok(tokyo)), Completion::Updated);

        // Paris answers last but was submitted first.
        let mut paris = reading(22.0, "2024-06-01 16:00");
        paris.location = "Paris".into();
        assert_eq!(widget.complete(first, Ok(paris)), Completion::Stale);

        assert_eq!(widget.reading().map(|r| r.location.as_str()), Some("Tokyo"));
        assert!(!widget.is_day_time());
        assert!(!widget.is_loading());
    }

    #[test]
    fn stale_result_does_not_end_loading_of_newer_search() {
        let mut widget = WeatherWidget::new(ScriptedProvider::with(vec![]));

        widget.set_input("Paris");
        let first = widget.begin_search().unwrap();
        widget.set_input("Tokyo");
        let _second = widget.begin_search().unwrap();

        assert_eq!(widget.complete(first, Err(anyhow!("timeout"))), Completion::Stale);
        assert!(widget.is_loading());
        assert!(widget.error().is_none());
    }

    #[test]
    fn blank_submission_supersedes_search_in_flight() {
        let mut widget = WeatherWidget::new(ScriptedProvider::with(vec![]));

        widget.set_input("Paris");
        let paris = widget.begin_search().unwrap();
        widget.set_input("   ");
        assert!(widget.begin_search().is_none());
        assert!(!widget.is_loading());

        let mut answer = reading(22.0, "2024-06-01 16:00");
        answer.location = "Paris".into();
        assert_eq!(widget.complete(paris, Ok(answer)), Completion::Stale);

        assert_eq!(widget.error(), Some(WidgetError::InvalidLocation));
        assert!(widget.reading().is_none());
        assert!(!widget.is_loading());

        let view = widget.view();
        assert_eq!(view.error.as_deref(), Some("Please enter a valid location."));
        assert_eq!(view.card, None);
    }
}
