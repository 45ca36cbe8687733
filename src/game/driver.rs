//! Performing controller requests against an oracle

use super::GameError;
use super::controller::{GameController, Request, Response};
use crate::oracle::{WordSource, WordValidator};

/// Carry out one request and package the answer for [`GameController::handle`]
pub async fn fulfil<O>(oracle: &O, request: Request) -> Response
where
    O: WordSource + WordValidator + ?Sized,
{
    match request {
        Request::FetchWord { token, length } => Response::WordFetched {
            token,
            result: oracle.generate_word(length).await,
        },
        Request::Validate { token, guess } => Response::Validated {
            token,
            result: oracle.is_valid_word(guess.text()).await,
        },
    }
}

impl GameController {
    /// Run `request` and any follow-ups it triggers to completion
    ///
    /// # Errors
    /// Whatever [`GameController::handle`] reports.
    pub async fn drive<O>(&mut self, oracle: &O, request: Request) -> Result<(), GameError>
    where
        O: WordSource + WordValidator + ?Sized,
    {
        let mut next = Some(request);
        while let Some(request) = next {
            let response = fulfil(oracle, request).await;
            next = self.handle(response)?;
        }
        Ok(())
    }

    /// Start a round and wait for its word
    ///
    /// # Errors
    /// `InvalidLength` outside 3..=10. Oracle failures do not surface here;
    /// they end in a fallback word.
    pub async fn reset_with<O>(&mut self, oracle: &O, length: usize) -> Result<(), GameError>
    where
        O: WordSource + WordValidator + ?Sized,
    {
        let request = self.start_round(length)?;
        self.drive(oracle, request).await
    }

    /// Submit the current row and wait for the verdict
    ///
    /// # Errors
    /// See [`GameController::submit`] and [`GameController::handle`].
    pub async fn submit_with<O>(&mut self, oracle: &O) -> Result<(), GameError>
    where
        O: WordSource + WordValidator + ?Sized,
    {
        let request = self.submit()?;
        self.drive(oracle, request).await
    }
}
