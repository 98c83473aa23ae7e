use autodefine_anki::AnkiConnectClient;
use autodefine_config::Config;
use autodefine_dictionary::{Fetcher, LabanDictionary, LookupError, OxfordDictionary};

use crate::enrich::Pipeline;
use crate::media::{AnkiMedia, MediaStore};

pub struct AppState {
    pub config: Config,
    pub anki: AnkiConnectClient,
    pub oxford: OxfordDictionary,
    pub laban: LabanDictionary,
    audio: Fetcher,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, LookupError> {
        let network = &config.network;
        let fetcher = || Fetcher::new(&network.user_agent, network.timeout());

        let oxford = OxfordDictionary::new(fetcher()?);
        let laban = LabanDictionary::new(fetcher()?);
        let audio = fetcher()?;
        let anki = AnkiConnectClient::new(config.anki.url.clone());

        Ok(Self {
            config,
            anki,
            oxford,
            laban,
            audio,
        })
    }

    /// Media store writing into the Anki collection
    pub fn anki_media(&self) -> AnkiMedia {
        AnkiMedia::new(
            self.anki.clone(),
            self.audio.clone(),
            self.config.network.audio_timeout(),
        )
    }

    pub fn pipeline<'a>(&'a self, media: &'a dyn MediaStore) -> Pipeline<'a> {
        Pipeline {
            config: &self.config,
            oxford: &self.oxford,
            laban: &self.laban,
            media,
        }
    }
}
