//! Response Pipeline
//!
//! One call to [`ResponsePipeline::respond`] handles one user turn:
//!
//! 1. record the utterance in memory and take the context of earlier turns
//! 2. classify the utterance
//! 3. answer with a fixed reply, the clock, web search, or the language model
//!
//! On the generation path question-style utterances go through the quality
//! gate, and a rejected answer is replaced by a web search for the original
//! utterance. Generation failures are not recovered here; they come back as
//! `EngineError::Generation`.

use sdk::EngineError;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::clock::{self, Clock, SystemClock};
use crate::intent::{self, Strategy};
use crate::llm::{GenerationAdapter, TextGenerator};
use crate::memory::{Context, MemoryBuffer};
use crate::persona::{RandomTraits, TraitSource};
use crate::prompt;
use crate::quality;
use crate::search::{SearchFallback, SearchProvider};

/// Reply to "who are you" and friends
pub const IDENTITY_REPLY: &str =
    "I'm Sara—your web-savvy, learning AI! Here for any question. What's up?";

/// Reply when asked for a name Sara has not heard yet
pub const ASK_NAME_REPLY: &str = "Sara says: What's your name? I'll keep it in mind!";

/// Speaker tag in front of generated answers
pub const SPEAKER_TAG: &str = "Sara says: ";

/// The response-decision pipeline
pub struct ResponsePipeline {
    memory: Mutex<MemoryBuffer>,
    generation: GenerationAdapter,
    search: SearchFallback,
    traits: Box<dyn TraitSource>,
    clock: Box<dyn Clock>,
}

impl ResponsePipeline {
    /// Create a pipeline with random traits and the system clock
    pub fn new(
        memory: MemoryBuffer,
        generator: Arc<dyn TextGenerator>,
        search: Arc<dyn SearchProvider>,
    ) -> Self {
        Self {
            memory: Mutex::new(memory),
            generation: GenerationAdapter::new(generator),
            search: SearchFallback::new(search),
            traits: Box::new(RandomTraits),
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the trait source
    pub fn with_traits(mut self, traits: impl TraitSource + 'static) -> Self {
        self.traits = Box::new(traits);
        self
    }

    /// Replace the clock
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Produce the reply for one utterance
    pub async fn respond(&self, utterance: &str) -> Result<String, EngineError> {
        let context = self.memory.lock().await.record(utterance);
        let strategy = intent::classify(utterance);

        tracing::info!("Handling utterance as {}", strategy);

        let reply = match strategy {
            Strategy::IdentityQuery => IDENTITY_REPLY.to_string(),
            Strategy::NameGuess => name_reply(&context),
            Strategy::TimeQuery => clock::time_reply(self.clock.now(), utterance),
            Strategy::WeatherQuery => self.search.reply(utterance).await,
            Strategy::Generate => self.generate_reply(&context, utterance).await?,
        };

        Ok(reply)
    }

    async fn generate_reply(&self, context: &Context, utterance: &str) -> Result<String, EngineError> {
        let persona = self.traits.pick();
        let is_question = prompt::is_question(utterance);
        let prompt = prompt::build(context, persona, utterance, is_question);

        tracing::debug!("Prompt ({}): {}", persona, prompt);

        let answer = self.generation.generate(&prompt, is_question).await?;

        if is_question {
            if let Err(rejection) = quality::check(&answer) {
                tracing::info!("Generated answer rejected ({:?}), searching instead", rejection);
                return Ok(self.search.reply(utterance).await);
            }
        }

        Ok(format!("{}{}", SPEAKER_TAG, answer))
    }

    /// Snapshot of the remembered utterances, oldest first
    pub async fn memory_snapshot(&self) -> Vec<String> {
        self.memory
            .lock()
            .await
            .entries()
            .map(String::from)
            .collect()
    }

    pub fn generation(&self) -> &GenerationAdapter {
        &self.generation
    }

    pub fn search(&self) -> &SearchFallback {
        &self.search
    }
}

fn name_reply(context: &Context) -> String {
    match intent::guess_name(context) {
        Some(name) => format!("Sara guesses: Are you {}? Spot on or off?", name),
        None => ASK_NAME_REPLY.to_string(),
    }
}
