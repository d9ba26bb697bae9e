pub mod aggregate;

pub use aggregate::{
    issue_number, CreateItIssueDto, IssueFilter, IssueStatus, IssueType, ItIssue,
    UpdateIssueStatusDto,
};
