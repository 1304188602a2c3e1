// Copyright (c) The translit-harness Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! An in-process widget with the same observable timing behavior as the real one.
//!
//! [`SimulatedWidget`] debounces its output and keeps the trailing token in a composing state
//! until a boundary character arrives. The transliteration itself is a pluggable function, so
//! a pass-through engine can be used to check the harness on its own.
//!
//! All timing goes through [`tokio::time`], so tests can run against a paused clock.

use crate::{
    errors::PageError,
    page::{Browser, Key, Page},
};
use std::{fmt, sync::Arc, time::Duration};
use tokio::time::Instant;

type Engine = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Opens [`SimulatedWidget`] pages that share one engine.
#[derive(Clone)]
pub struct SimulatedBrowser {
    debounce: Duration,
    engine: Engine,
}

impl SimulatedBrowser {
    /// Creates a browser whose pages debounce for `debounce` and render through `engine`.
    pub fn new(
        debounce: Duration,
        engine: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            debounce,
            engine: Arc::new(engine),
        }
    }

    /// Creates a browser whose pages render their input unchanged.
    pub fn pass_through(debounce: Duration) -> Self {
        Self::new(debounce, str::to_owned)
    }
}

impl fmt::Debug for SimulatedBrowser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedBrowser")
            .field("debounce", &self.debounce)
            .finish_non_exhaustive()
    }
}

impl Browser for SimulatedBrowser {
    type Page = SimulatedWidget;

    async fn new_page(&self) -> Result<SimulatedWidget, PageError> {
        Ok(SimulatedWidget::with_engine(
            self.debounce,
            self.engine.clone(),
        ))
    }
}

/// A page holding a simulated transliteration widget.
pub struct SimulatedWidget {
    debounce: Duration,
    engine: Engine,
    url: Option<String>,
    // Everything typed so far.
    text: String,
    // Byte offset into `text`; everything before it has been committed by a boundary.
    committed: usize,
    last_input: Option<Instant>,
    // What the control currently shows.
    rendered: String,
}

impl SimulatedWidget {
    /// Creates a widget that debounces for `debounce` and renders through `engine`.
    pub fn new(
        debounce: Duration,
        engine: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self::with_engine(debounce, Arc::new(engine))
    }

    /// Creates a widget that renders its input unchanged.
    pub fn pass_through(debounce: Duration) -> Self {
        Self::new(debounce, str::to_owned)
    }

    fn with_engine(debounce: Duration, engine: Engine) -> Self {
        Self {
            debounce,
            engine,
            url: None,
            text: String::new(),
            committed: 0,
            last_input: None,
            rendered: String::new(),
        }
    }

    /// The URL last navigated to.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn reset(&mut self) {
        self.text.clear();
        self.committed = 0;
        self.last_input = None;
        self.rendered.clear();
    }

    // Brings the rendered output up to date if the widget has been quiet for the debounce
    // window. Called before every input event and every read.
    fn settle_if_quiet(&mut self) {
        let quiet = self
            .last_input
            .is_none_or(|last| last.elapsed() >= self.debounce);
        if quiet {
            let (committed, composing) = self.text.split_at(self.committed);
            self.rendered = (self.engine)(committed);
            self.rendered.push_str(composing);
        }
    }

    fn input_char(&mut self, ch: char) {
        self.settle_if_quiet();
        self.text.push(ch);
        if ch.is_whitespace() {
            self.committed = self.text.len();
        }
        self.last_input = Some(Instant::now());
    }

    fn backspace(&mut self) {
        self.settle_if_quiet();
        self.text.pop();
        // Deleting a boundary doesn't un-commit the token before it.
        self.committed = self.committed.min(self.text.len());
        self.last_input = Some(Instant::now());
    }
}

impl fmt::Debug for SimulatedWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedWidget")
            .field("debounce", &self.debounce)
            .field("url", &self.url)
            .field("text", &self.text)
            .field("committed", &self.committed)
            .field("rendered", &self.rendered)
            .finish_non_exhaustive()
    }
}

impl Page for SimulatedWidget {
    async fn navigate(&mut self, url: &str) -> Result<(), PageError> {
        self.url = Some(url.to_owned());
        self.reset();
        Ok(())
    }

    async fn click(&mut self) -> Result<(), PageError> {
        Ok(())
    }

    async fn clear(&mut self) -> Result<(), PageError> {
        self.reset();
        Ok(())
    }

    async fn type_sequence(&mut self, text: &str, delay: Duration) -> Result<(), PageError> {
        for (index, ch) in text.chars().enumerate() {
            if index > 0 {
                tokio::time::sleep(delay).await;
            }
            self.input_char(ch);
        }
        Ok(())
    }

    async fn press(&mut self, key: Key) -> Result<(), PageError> {
        match key {
            Key::Space => self.input_char(' '),
            Key::Backspace => self.backspace(),
        }
        Ok(())
    }

    async fn input_value(&mut self) -> Result<String, PageError> {
        self.settle_if_quiet();
        Ok(self.rendered.clone())
    }

    async fn wait_for(&mut self, duration: Duration) -> Result<(), PageError> {
        tokio::time::sleep(duration).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DEBOUNCE: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn output_lags_until_quiet() {
        let mut page = SimulatedWidget::new(DEBOUNCE, |text: &str| text.replace("naan", "நான்"));

        page.type_sequence("naan ", Duration::from_millis(10))
            .await
            .unwrap();
        assert_eq!(page.input_value().await.unwrap(), "");

        tokio::time::sleep(DEBOUNCE).await;
        assert_eq!(page.input_value().await.unwrap(), "நான் ");

        // A keystroke shortly after keeps showing the previous settled output.
        page.type_sequence("s", Duration::ZERO).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(page.input_value().await.unwrap(), "நான் ");

        tokio::time::sleep(DEBOUNCE).await;
        assert_eq!(page.input_value().await.unwrap(), "நான் s");
    }

    #[tokio::test(start_paused = true)]
    async fn navigate_resets() {
        let browser = SimulatedBrowser::pass_through(DEBOUNCE);
        let mut page = browser.new_page().await.unwrap();
        page.type_sequence("abc", Duration::ZERO).await.unwrap();
        page.navigate("/").await.unwrap();

        assert_eq!(page.url(), Some("/"));
        tokio::time::sleep(DEBOUNCE).await;
        assert_eq!(page.input_value().await.unwrap(), "");
    }
}
