use futures::FutureExt;

use crate::TaskError;

/// The raw documents of a single, already fetched match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchData {
    pub match_id: String,
    pub timeline: String,
    pub match_document: String,
}

pub trait MatchStorage: Send + Sync {
    fn duplicate(&self) -> Box<dyn MatchStorage>;

    fn list_matches<'f, 'own>(&'own self) -> futures::future::BoxFuture<'f, Result<Vec<String>, TaskError>>
    where
        'own: 'f;

    fn load<'f, 'own>(
        &'own self,
        match_id: String,
    ) -> futures::future::BoxFuture<'f, Result<MatchData, TaskError>>
    where
        'own: 'f;
}

/// Expects one folder per match, `<folder>/<match id>/{timeline,match}.json`.
pub struct FileStorage {
    folder: std::sync::Arc<std::path::PathBuf>,
}

impl FileStorage {
    pub fn new<P>(folder: P) -> Self
    where
        P: Into<std::path::PathBuf>,
    {
        Self {
            folder: std::sync::Arc::new(folder.into()),
        }
    }
}

impl MatchStorage for FileStorage {
    fn duplicate(&self) -> Box<dyn MatchStorage> {
        Box::new(Self {
            folder: self.folder.clone(),
        })
    }

    fn list_matches<'f, 'own>(&'own self) -> futures::future::BoxFuture<'f, Result<Vec<String>, TaskError>>
    where
        'own: 'f,
    {
        async move {
            let mut entries = tokio::fs::read_dir(self.folder.as_path()).await?;

            let mut matches = Vec::new();
            while let Some(entry) = entries.next_entry().await? {
                if !entry.file_type().await?.is_dir() {
                    continue;
                }

                match entry.file_name().into_string() {
                    Ok(name) => matches.push(name),
                    Err(name) => tracing::warn!("Skipping non UTF-8 folder {:?}", name),
                }
            }
            matches.sort();

            Ok(matches)
        }
        .boxed()
    }

    fn load<'f, 'own>(
        &'own self,
        match_id: String,
    ) -> futures::future::BoxFuture<'f, Result<MatchData, TaskError>>
    where
        'own: 'f,
    {
        async move {
            let match_folder = std::path::Path::new(self.folder.as_path()).join(&match_id);

            let timeline = tokio::fs::read_to_string(match_folder.join("timeline.json")).await?;
            let match_document = tokio::fs::read_to_string(match_folder.join("match.json")).await?;

            Ok(MatchData {
                match_id,
                timeline,
                match_document,
            })
        }
        .boxed()
    }
}
