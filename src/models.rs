use serde::{Deserialize, Serialize};

/// Top-level envelope returned by `gh api graphql`
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse {
    pub data: Option<ReviewThreadsData>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ReviewThreadsData {
    pub repository: Option<Repository>,
}

#[derive(Debug, Deserialize)]
pub struct Repository {
    #[serde(rename = "pullRequest")]
    pub pull_request: Option<PullRequest>,
}

#[derive(Debug, Deserialize)]
pub struct PullRequest {
    pub number: Option<i64>,
    #[serde(rename = "headRefName")]
    pub head_ref_name: Option<String>,
    #[serde(rename = "reviewThreads")]
    pub review_threads: Connection<ReviewThread>,
}

/// GraphQL list wrapper, e.g. `{"nodes": [...]}`
#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    pub nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewThread {
    pub id: String,
    #[serde(rename = "isResolved")]
    pub is_resolved: bool,
    pub path: String,
    pub line: Option<i64>,
    #[serde(rename = "originalLine")]
    pub original_line: Option<i64>,
    #[serde(rename = "diffSide")]
    pub diff_side: String,
    pub comments: Connection<Comment>,
}

#[derive(Debug, Deserialize)]
pub struct Comment {
    pub id: String,
    pub body: String,
    pub author: Actor,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "diffHunk")]
    pub diff_hunk: String,
    pub reactions: Connection<Reaction>,
}

#[derive(Debug, Deserialize)]
pub struct Actor {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct Reaction {
    pub content: String,
    // null when the reacting account has been deleted
    pub user: Option<Actor>,
}

impl Reaction {
    pub fn is_from(&self, login: &str) -> bool {
        self.user.as_ref().is_some_and(|user| user.login == login)
    }
}

/// Output projection of a review thread the reviewer approved
#[derive(Debug, Serialize, PartialEq)]
pub struct ApprovedThread {
    pub id: String,
    pub path: String,
    pub line: Option<i64>,
    #[serde(rename = "originalLine")]
    pub original_line: Option<i64>,
    #[serde(rename = "diffSide")]
    pub diff_side: String,
    pub comments: Vec<ApprovedComment>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ApprovedComment {
    pub id: String,
    pub body: String,
    pub author: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "diffHunk")]
    pub diff_hunk: String,
}

impl From<&Comment> for ApprovedComment {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.clone(),
            body: comment.body.clone(),
            author: comment.author.login.clone(),
            created_at: comment.created_at.clone(),
            diff_hunk: comment.diff_hunk.clone(),
        }
    }
}

impl From<&ReviewThread> for ApprovedThread {
    fn from(thread: &ReviewThread) -> Self {
        Self {
            id: thread.id.clone(),
            path: thread.path.clone(),
            line: thread.line,
            original_line: thread.original_line,
            diff_side: thread.diff_side.clone(),
            comments: thread.comments.nodes.iter().map(ApprovedComment::from).collect(),
        }
    }
}
