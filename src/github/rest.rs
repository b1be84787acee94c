//! Thin REST client for the handful of endpoints GraphQL does not cover:
//! release listing/creation, asset upload, PR lookup by commit, and branch
//! ref deletion.

use crate::core::error::{ApiError, BoardError, QmError, QmResult};
use serde::Deserialize;

const API_ROOT: &str = "https://api.github.com";
const PAGE_SIZE: usize = 100;

/// An existing release, as returned by `GET /repos/{repo}/releases`
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
  pub tag_name: String,
  #[serde(default)]
  pub prerelease: bool,
}

/// Release created by `POST /repos/{repo}/releases`
#[derive(Debug, Deserialize)]
pub struct CreatedRelease {
  pub html_url: String,
  pub upload_url: String,
}

#[derive(Debug, Deserialize)]
pub struct PullSummary {
  pub number: u64,
}

#[derive(Debug, Deserialize)]
struct PullDetail {
  head: PullHead,
}

#[derive(Debug, Deserialize)]
struct PullHead {
  #[serde(rename = "ref")]
  branch: String,
}

/// What happened to a `DELETE /git/refs/...` call
#[derive(Debug, PartialEq, Eq)]
pub enum RefDeletion {
  Deleted,
  /// 404: someone already deleted it
  AlreadyGone,
  /// 422: protected or otherwise not deletable
  Refused,
}

pub struct RestClient {
  token: String,
  repo: String,
}

impl RestClient {
  /// `repo` is an `owner/name` slug
  pub fn new(token: Option<String>, repo: String) -> QmResult<Self> {
    match token {
      Some(token) if !token.trim().is_empty() => Ok(Self { token, repo }),
      _ => Err(QmError::Board(BoardError::AuthMissing)),
    }
  }

  /// All releases, paginated until a short page
  pub fn list_releases(&self) -> QmResult<Vec<Release>> {
    let mut releases = Vec::new();
    let mut page = 1;

    loop {
      let url = format!(
        "{}/repos/{}/releases?per_page={}&page={}",
        API_ROOT, self.repo, PAGE_SIZE, page
      );
      let batch: Vec<Release> = self.headers(ureq::get(&url)).call()?.into_json()?;
      let short_page = batch.len() < PAGE_SIZE;
      releases.extend(batch);
      if short_page {
        return Ok(releases);
      }
      page += 1;
    }
  }

  /// Create a release; the returned value carries the asset upload URL
  pub fn create_release(
    &self,
    tag: &str,
    name: &str,
    notes: &str,
    prerelease: bool,
  ) -> QmResult<CreatedRelease> {
    let url = format!("{}/repos/{}/releases", API_ROOT, self.repo);
    let created: CreatedRelease = self
      .headers(ureq::post(&url))
      .send_json(serde_json::json!({
        "tag_name": tag,
        "name": name,
        "body": notes,
        "prerelease": prerelease,
      }))?
      .into_json()?;
    Ok(created)
  }

  /// Upload a zip asset to a freshly created release
  pub fn upload_asset(&self, upload_url: &str, file_name: &str, data: &[u8]) -> QmResult<()> {
    let url = asset_upload_url(upload_url, file_name).ok_or_else(|| {
      QmError::Api(ApiError::Malformed {
        detail: format!("unusable upload URL: {}", upload_url),
      })
    })?;

    self
      .headers(ureq::post(&url))
      .set("Content-Type", "application/zip")
      .send_bytes(data)?;
    Ok(())
  }

  /// PRs associated with a commit (empty when the commit landed without one)
  pub fn pulls_for_commit(&self, sha: &str) -> QmResult<Vec<PullSummary>> {
    let url = format!("{}/repos/{}/commits/{}/pulls", API_ROOT, self.repo, sha);
    let pulls: Vec<PullSummary> = self.headers(ureq::get(&url)).call()?.into_json()?;
    Ok(pulls)
  }

  /// Head branch name of a PR
  pub fn pull_head_branch(&self, number: u64) -> QmResult<String> {
    let url = format!("{}/repos/{}/pulls/{}", API_ROOT, self.repo, number);
    let detail: PullDetail = self.headers(ureq::get(&url)).call()?.into_json()?;
    Ok(detail.head.branch)
  }

  /// Delete `refs/heads/<branch>`, tolerating already-gone and refused
  pub fn delete_branch_ref(&self, branch: &str) -> QmResult<RefDeletion> {
    let url = format!("{}/repos/{}/git/refs/heads/{}", API_ROOT, self.repo, branch);
    match self.headers(ureq::delete(&url)).call() {
      Ok(_) => Ok(RefDeletion::Deleted),
      Err(ureq::Error::Status(404, _)) => Ok(RefDeletion::AlreadyGone),
      Err(ureq::Error::Status(422, _)) => Ok(RefDeletion::Refused),
      Err(err) => Err(err.into()),
    }
  }

  fn headers(&self, request: ureq::Request) -> ureq::Request {
    request
      .set("Authorization", &format!("Bearer {}", self.token))
      .set("Accept", "application/vnd.github+json")
      .set("X-GitHub-Api-Version", "2022-11-28")
      .set("User-Agent", super::USER_AGENT)
  }
}

/// Expand GitHub's templated upload URL (`...{?name,label}`) for one file
fn asset_upload_url(upload_url: &str, file_name: &str) -> Option<String> {
  let base = upload_url.split('{').next()?;
  if base.is_empty() {
    return None;
  }
  Some(format!("{}?name={}", base, file_name))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_asset_upload_url_strips_template() {
    let url = asset_upload_url(
      "https://uploads.github.com/repos/o/r/releases/1/assets{?name,label}",
      "Addon-1.2.3.zip",
    )
    .unwrap();
    assert_eq!(
      url,
      "https://uploads.github.com/repos/o/r/releases/1/assets?name=Addon-1.2.3.zip"
    );
  }

  #[test]
  fn test_asset_upload_url_plain() {
    let url = asset_upload_url("https://uploads.github.com/x/assets", "a.zip").unwrap();
    assert_eq!(url, "https://uploads.github.com/x/assets?name=a.zip");
  }

  #[test]
  fn test_release_deserializes_from_api_shape() {
    let json = r#"[{"tag_name": "v1.4.2", "prerelease": false, "draft": false, "id": 9}]"#;
    let releases: Vec<Release> = serde_json::from_str(json).unwrap();
    assert_eq!(releases[0].tag_name, "v1.4.2");
    assert!(!releases[0].prerelease);
  }
}
