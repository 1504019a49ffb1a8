// src/checker/classify.rs
// =============================================================================
// Link classification: decide what to probe, probe it, record the outcome.
//
// How it works:
// 1. Skip policy - anchors, reference markers, wiki links, relative paths
//    and excluded extensions get a Skipped status, no network call
// 2. Every other URL becomes a job (index, url)
// 3. Jobs run through a bounded pool (buffer_unordered), each one under its
//    own deadline, so one slow host never holds up the others
// 4. Finished jobs come back as (index, status) pairs; once the pool is done
//    (or cancelled) the statuses are written into the records by index
//
// Because statuses go into pre-existing slots, the record order never
// depends on which probe finished first. Cancelling keeps every status that
// was already resolved; unresolved records keep `status: None`.
// =============================================================================

use super::http::Probe;
use super::status::{LinkStatus, ProbeError, SkipReason};
use crate::analyzer::{ImageRecord, LinkKind, LinkRecord, REFERENCE_PREFIX};
use crate::config::Config;
use futures::stream::{self, StreamExt};
use std::future::Future;
use tracing::{debug, info};
use url::Url;

/// Broken records from one classification pass.
#[derive(Debug, Clone)]
pub struct Validation<T> {
    /// Records classified Unreachable, in extraction order
    pub broken: Vec<T>,
    /// True if the pass was cancelled before every probe resolved
    pub cancelled: bool,
}

// Anything with a URL the classifier can put a status on
trait Target: Clone {
    fn url(&self) -> &str;
    fn kind(&self) -> Option<LinkKind>;
    fn set_status(&mut self, status: LinkStatus);
    fn is_broken(&self) -> bool;
}

impl Target for LinkRecord {
    fn url(&self) -> &str {
        &self.url
    }

    fn kind(&self) -> Option<LinkKind> {
        Some(self.kind)
    }

    fn set_status(&mut self, status: LinkStatus) {
        self.status = Some(status);
    }

    fn is_broken(&self) -> bool {
        LinkRecord::is_broken(self)
    }
}

impl Target for ImageRecord {
    fn url(&self) -> &str {
        &self.url
    }

    fn kind(&self) -> Option<LinkKind> {
        None
    }

    fn set_status(&mut self, status: LinkStatus) {
        self.status = Some(status);
    }

    fn is_broken(&self) -> bool {
        ImageRecord::is_broken(self)
    }
}

/// Decides whether a URL is checkable. First matching rule wins.
pub fn skip_reason(url: &str, kind: Option<LinkKind>, config: &Config) -> Option<SkipReason> {
    if url.starts_with('#') {
        return Some(SkipReason::Anchor);
    }
    if url.starts_with(REFERENCE_PREFIX) {
        return Some(SkipReason::Reference);
    }
    if kind == Some(LinkKind::Wiki) {
        return Some(SkipReason::Wiki);
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Some(SkipReason::NotHttp);
    }
    if has_excluded_extension(url, &config.exclude_extensions) {
        return Some(SkipReason::ExcludedExtension);
    }
    None
}

// Compares the URL path against the list, case-insensitively; "pdf" and
// ".pdf" mean the same thing. The host is never matched, so "org" does not
// exclude https://rust-lang.org. Unparseable URLs are left to the probe.
fn has_excluded_extension(url: &str, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return false;
    }

    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let path = parsed.path().to_lowercase();

    extensions.iter().any(|ext| {
        let ext = ext.trim().trim_start_matches('.').to_lowercase();
        !ext.is_empty() && path.ends_with(&format!(".{}", ext))
    })
}

/// Classifies every link and returns the broken ones.
///
/// Each record's `status` is filled in; the slice keeps its order.
pub async fn validate_links<P: Probe>(
    links: &mut [LinkRecord],
    config: &Config,
    prober: &P,
) -> Vec<LinkRecord> {
    classify(links, config, prober, std::future::pending()).await.broken
}

/// Like [`validate_links`], but stops early once `cancel` completes.
pub async fn validate_links_until<P, C>(
    links: &mut [LinkRecord],
    config: &Config,
    prober: &P,
    cancel: C,
) -> Validation<LinkRecord>
where
    P: Probe,
    C: Future<Output = ()>,
{
    classify(links, config, prober, cancel).await
}

/// Classifies image URLs with the same policy as links.
pub async fn validate_images<P: Probe>(
    images: &mut [ImageRecord],
    config: &Config,
    prober: &P,
) -> Vec<ImageRecord> {
    classify(images, config, prober, std::future::pending()).await.broken
}

/// Like [`validate_images`], but stops early once `cancel` completes.
pub async fn validate_images_until<P, C>(
    images: &mut [ImageRecord],
    config: &Config,
    prober: &P,
    cancel: C,
) -> Validation<ImageRecord>
where
    P: Probe,
    C: Future<Output = ()>,
{
    classify(images, config, prober, cancel).await
}

async fn classify<T, P, C>(targets: &mut [T], config: &Config, prober: &P, cancel: C) -> Validation<T>
where
    T: Target,
    P: Probe,
    C: Future<Output = ()>,
{
    let mut jobs = Vec::new();

    for (index, target) in targets.iter_mut().enumerate() {
        match skip_reason(target.url(), target.kind(), config) {
            Some(reason) => target.set_status(LinkStatus::skipped(reason)),
            None => jobs.push((index, target.url().to_string())),
        }
    }

    info!(
        checkable = jobs.len(),
        skipped = targets.len() - jobs.len(),
        concurrency = config.concurrency,
        "classifying urls"
    );

    let (resolved, cancelled) = run_probes(jobs, config, prober, cancel).await;

    for (index, status) in resolved {
        targets[index].set_status(status);
    }

    let broken = targets.iter().filter(|t| t.is_broken()).cloned().collect();
    Validation { broken, cancelled }
}

// Runs the probe jobs through a bounded pool.
//
// Returns every (index, status) that resolved, and whether `cancel` fired
// first. Dropping the stream on cancel drops the in-flight probes with it.
async fn run_probes<P, C>(
    jobs: Vec<(usize, String)>,
    config: &Config,
    prober: &P,
    cancel: C,
) -> (Vec<(usize, LinkStatus)>, bool)
where
    P: Probe,
    C: Future<Output = ()>,
{
    if jobs.is_empty() {
        return (Vec::new(), false);
    }

    let deadline = config.probe_timeout();
    let total = jobs.len();

    let mut pending = stream::iter(jobs)
        .map(|(index, url)| async move {
            let outcome = match tokio::time::timeout(deadline, prober.probe(&url)).await {
                Ok(outcome) => outcome,
                Err(_elapsed) => Err(ProbeError::Timeout),
            };
            let status = LinkStatus::from_probe(outcome);
            debug!(%url, %status, "probed");
            (index, status)
        })
        .buffer_unordered(config.concurrency);

    tokio::pin!(cancel);

    let mut resolved = Vec::with_capacity(total);
    let mut cancelled = false;

    loop {
        tokio::select! {
            biased;

            _ = &mut cancel => {
                cancelled = true;
                break;
            }
            next = pending.next() => match next {
                Some(done) => resolved.push(done),
                None => break,
            },
        }
    }

    if cancelled {
        info!(resolved = resolved.len(), total, "classification cancelled");
    }

    (resolved, cancelled)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why (index, status) pairs instead of mutating records in the workers?
//    - buffer_unordered yields results in completion order, not input order
//    - Writing by index afterwards keeps `links` in extraction order
//    - No record is shared between tasks, so no Mutex is needed
//
// 2. What does tokio::select! with `biased;` do?
//    - Polls the branches top to bottom instead of randomly
//    - The cancel branch is checked first on every wake-up
//
// 3. Why tokio::pin!(cancel)?
//    - select! polls `&mut cancel` repeatedly, which needs a pinned future
//    - pin! pins it on the stack without a Box
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::extract_links;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    // Answers from a fixed table and remembers every URL it was asked about.
    // URLs containing "slow" sleep first.
    #[derive(Default)]
    struct FakeProber {
        answers: HashMap<String, Result<u16, ProbeError>>,
        slow_for: Duration,
        calls: Mutex<Vec<String>>,
    }

    impl FakeProber {
        fn with(answers: &[(&str, Result<u16, ProbeError>)]) -> Self {
            Self {
                answers: answers.iter().map(|(u, r)| (u.to_string(), r.clone())).collect(),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Probe for FakeProber {
        async fn probe(&self, url: &str) -> Result<u16, ProbeError> {
            self.calls.lock().unwrap().push(url.to_string());
            if url.contains("slow") {
                tokio::time::sleep(self.slow_for).await;
            }
            self.answers
                .get(url)
                .cloned()
                .unwrap_or_else(|| Err(ProbeError::Transport("ConnectionError".into())))
        }
    }

    fn link(url: &str) -> LinkRecord {
        LinkRecord::new("text", url, LinkKind::Standard)
    }

    #[tokio::test]
    async fn test_skip_policy_never_probes() {
        let mut links = vec![
            link("#install"),
            LinkRecord::new("guide", "ref:guide", LinkKind::Reference),
            LinkRecord::new("Home", "https://wiki.example/Home", LinkKind::Wiki),
            link("README.md"),
            link("mailto:me@example.com"),
        ];
        let prober = FakeProber::default();

        let broken = validate_links(&mut links, &Config::default(), &prober).await;

        assert!(broken.is_empty());
        assert!(prober.calls().is_empty());
        let reasons: Vec<_> = links
            .iter()
            .map(|l| match &l.status {
                Some(LinkStatus::Skipped { reason }) => *reason,
                other => panic!("expected skipped, got {:?}", other),
            })
            .collect();
        assert_eq!(
            reasons,
            vec![
                SkipReason::Anchor,
                SkipReason::Reference,
                SkipReason::Wiki,
                SkipReason::NotHttp,
                SkipReason::NotHttp,
            ]
        );
    }

    #[tokio::test]
    async fn test_excluded_extensions_are_skipped() {
        let config = Config {
            exclude_extensions: vec!["pdf".into(), ".ZIP".into()],
            ..Config::default()
        };
        let mut links = vec![
            link("https://example.com/paper.PDF?download=1"),
            link("https://example.com/archive.zip"),
            link("https://example.com/page"),
        ];
        let prober = FakeProber::with(&[("https://example.com/page", Ok(200))]);

        validate_links(&mut links, &config, &prober).await;

        assert_eq!(prober.calls(), vec!["https://example.com/page"]);
        assert_eq!(
            links[0].status,
            Some(LinkStatus::skipped(SkipReason::ExcludedExtension))
        );
        assert_eq!(links[2].status, Some(LinkStatus::Reachable { code: 200 }));
    }

    #[test]
    fn test_excluded_extension_ignores_the_host() {
        let config = Config {
            exclude_extensions: vec!["org".into(), "pdf".into()],
            ..Config::default()
        };

        assert_eq!(skip_reason("https://rust-lang.org", Some(LinkKind::Standard), &config), None);
        assert_eq!(skip_reason("https://rust-lang.org/", Some(LinkKind::Standard), &config), None);
        assert_eq!(
            skip_reason("https://docs.example/manual.pdf#page=2", Some(LinkKind::Standard), &config),
            Some(SkipReason::ExcludedExtension)
        );
        assert_eq!(
            skip_reason("https://example.com/files/data.org", None, &config),
            Some(SkipReason::ExcludedExtension)
        );
    }

    #[tokio::test]
    async fn test_status_codes_are_classified() {
        let prober = FakeProber::with(&[
            ("https://ok.example", Ok(200)),
            ("https://moved.example", Ok(301)),
            ("https://gone.example", Ok(404)),
            ("https://down.example", Ok(500)),
        ]);
        let mut links = vec![
            link("https://ok.example"),
            link("https://moved.example"),
            link("https://gone.example"),
            link("https://down.example"),
        ];

        let broken = validate_links(&mut links, &Config::default(), &prober).await;

        let broken_urls: Vec<_> = broken.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(broken_urls, vec!["https://gone.example", "https://down.example"]);
        assert_eq!(links[1].status, Some(LinkStatus::Reachable { code: 301 }));
        assert_eq!(broken[0].status.as_ref().unwrap().to_string(), "Broken (404)");
    }

    #[tokio::test]
    async fn test_every_transport_error_is_broken() {
        let text = "[a](https://a.example) [b](http://b.example) [c](#top) [[Wiki]] [d](docs/d.md)";
        let mut links = extract_links(text);
        let prober = FakeProber::default();

        let broken = validate_links(&mut links, &Config::default(), &prober).await;

        assert_eq!(prober.calls().len(), 2);
        assert_eq!(broken.len(), 2);
        assert!(broken.iter().all(|l| l.status.as_ref().unwrap().to_string()
            == "Broken (ConnectionError)"));
    }

    #[tokio::test]
    async fn test_timeout_does_not_hold_up_other_links() {
        let config = Config {
            timeout: 0.2,
            concurrency: 4,
            ..Config::default()
        };
        let prober = FakeProber {
            slow_for: Duration::from_secs(30),
            ..FakeProber::with(&[("https://fast.example", Ok(200))])
        };
        let mut links = vec![link("https://slow.example"), link("https://fast.example")];

        let started = Instant::now();
        let broken = validate_links(&mut links, &config, &prober).await;

        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(broken.len(), 1);
        assert_eq!(links[0].status.as_ref().unwrap().to_string(), "Broken (Timeout)");
        assert_eq!(links[1].status, Some(LinkStatus::Reachable { code: 200 }));
    }

    #[tokio::test]
    async fn test_order_is_kept_whatever_finishes_first() {
        let config = Config {
            concurrency: 4,
            ..Config::default()
        };
        let prober = FakeProber {
            slow_for: Duration::from_millis(150),
            ..FakeProber::with(&[
                ("https://slow.example/1", Ok(404)),
                ("https://quick.example/2", Ok(200)),
                ("https://quick.example/3", Ok(410)),
            ])
        };
        let mut links = vec![
            link("https://slow.example/1"),
            link("https://quick.example/2"),
            link("https://quick.example/3"),
        ];

        let broken = validate_links(&mut links, &config, &prober).await;

        let urls: Vec<_> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://slow.example/1", "https://quick.example/2", "https://quick.example/3"]
        );
        assert_eq!(links[0].status.as_ref().unwrap().to_string(), "Broken (404)");
        assert_eq!(links[1].status.as_ref().unwrap().to_string(), "OK (200)");
        assert_eq!(broken.len(), 2);
    }

    #[tokio::test]
    async fn test_sequential_pool() {
        let config = Config {
            concurrency: 1,
            ..Config::default()
        };
        let prober = FakeProber::with(&[("https://a.example", Ok(200)), ("https://b.example", Ok(200))]);
        let mut links = vec![link("https://a.example"), link("https://b.example")];

        let broken = validate_links(&mut links, &config, &prober).await;

        assert!(broken.is_empty());
        assert_eq!(prober.calls(), vec!["https://a.example", "https://b.example"]);
    }

    #[tokio::test]
    async fn test_cancel_keeps_resolved_statuses() {
        let config = Config {
            timeout: 60.0,
            concurrency: 4,
            ..Config::default()
        };
        let prober = FakeProber {
            slow_for: Duration::from_secs(60),
            ..FakeProber::with(&[("https://fast.example", Ok(200))])
        };
        let mut links = vec![link("https://slow.example"), link("https://fast.example"), link("#local")];

        let cancel = tokio::time::sleep(Duration::from_millis(200));
        let validation = validate_links_until(&mut links, &config, &prober, cancel).await;

        assert!(validation.cancelled);
        assert!(validation.broken.is_empty());
        assert_eq!(links[0].status, None);
        assert_eq!(links[1].status, Some(LinkStatus::Reachable { code: 200 }));
        assert_eq!(links[2].status, Some(LinkStatus::skipped(SkipReason::Anchor)));
    }

    #[tokio::test]
    async fn test_images_share_the_policy() {
        let prober = FakeProber::with(&[("https://cdn.example/logo.png", Ok(404))]);
        let mut images = vec![
            ImageRecord::new("logo", "https://cdn.example/logo.png"),
            ImageRecord::new("", "img/local.png"),
        ];

        let broken = validate_images(&mut images, &Config::default(), &prober).await;

        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].alt, "logo");
        assert_eq!(images[1].status, Some(LinkStatus::skipped(SkipReason::NotHttp)));
    }
}
