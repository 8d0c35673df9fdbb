//! Constants used in the deploy scripts

// -------------------
// | Contract naming |
// -------------------

/// The name under which the RealityV2 deployment is submitted
pub const REALITY_V2_CONTRACT_NAME: &str = "RealityV2";

/// The deployment record name of the arbitrator (core) contract
pub const KLEROS_CORE_RECORD: &str = "KlerosCore";

/// The deployment record name of the dispute template registry
pub const DISPUTE_TEMPLATE_REGISTRY_RECORD: &str = "DisputeTemplateRegistry";

// -------------------------
// | Constructor arguments |
// -------------------------

/// The subcourt that disputes are raised in (the general court)
pub const GENERAL_COURT_ID: u64 = 1;

/// The minimum number of jurors drawn for a dispute
pub const MIN_JURORS: u64 = 3;

/// The arbitrator extra data, two ABI words encoding
/// `GENERAL_COURT_ID` followed by `MIN_JURORS`
pub const EXTRA_DATA: &str = "0x00000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000003";

/// The time after which an unpaid arbitration fee may be reclaimed, in seconds
pub const FEE_TIMEOUT_SECS: u64 = 600;

/// The dispute template mappings
///
/// The mappings schema has not been defined yet, so this is passed through as
/// an opaque placeholder.
pub const DISPUTE_TEMPLATE_MAPPINGS: &str = "TODO";

// --------------------
// | Dispute template |
// --------------------

/// The dispute title
pub const TEMPLATE_TITLE: &str = "A reality.eth question";

/// The dispute description
pub const TEMPLATE_DESCRIPTION: &str = "A reality.eth question has been raised to arbitration.";

/// The policy document, pinned on IPFS
pub const TEMPLATE_POLICY_URI: &str = "/ipfs/QmZ5XaV2RVgBADq5qMpbuEwgCuPZdRgCeu8rhGtJWLV6yz";

/// The prefix of the reality.eth frontend question URL
pub const TEMPLATE_FRONTEND_URL_PREFIX: &str = "https://reality.eth.limo/app/#!/question/";

/// The court category
pub const TEMPLATE_CATEGORY: &str = "Oracle";

/// The template language
pub const TEMPLATE_LANG: &str = "en_US";

/// The Kleros improvement proposal the template conforms to
pub const TEMPLATE_SPECIFICATION: &str = "KIP99";

/// The template version
pub const TEMPLATE_VERSION: &str = "1.0";

/// The title of the answer prepended to every answer set
pub const ANSWERED_TOO_SOON_TITLE: &str = "Answered Too Soon";

/// The description of the answer prepended to every answer set
pub const ANSWERED_TOO_SOON_DESCRIPTION: &str = "Answered Too Soon.";

// ----------------------------
// | Template placeholder keys |
// ----------------------------

/// The placeholder holding the question text
pub const QUESTION_KEY: &str = "question";

/// The placeholder holding the question type
pub const TYPE_KEY: &str = "type";

/// The section iterating over the question's answers
pub const ANSWERS_KEY: &str = "answers";

/// The per-answer title placeholder
pub const ANSWER_TITLE_KEY: &str = "title";

/// The per-answer description placeholder
pub const ANSWER_DESCRIPTION_KEY: &str = "description";

/// The per-answer flag marking the final answer
pub const LAST_KEY: &str = "last";

/// The placeholder holding the reality.eth contract address
pub const REALITY_ADDRESS_KEY: &str = "realityAddress";

/// The placeholder holding the reality.eth question id
pub const QUESTION_ID_KEY: &str = "questionId";

// ------------
// | Defaults |
// ------------

/// The default RPC URL, a local hardhat or anvil node
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// The default timeout for fetching published deployments, in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// The extension of deployment record and artifact files
pub const JSON_EXTENSION: &str = "json";
