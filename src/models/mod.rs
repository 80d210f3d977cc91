pub mod loaders;
pub mod narration;
pub mod platform;

pub use loaders::{load_narration_script, parse_narration_script};
pub use narration::{NarrationEvent, NarrationScript};
pub use platform::{
    Comment, CreateCommentResponse, CreatePostResponse, NewComment, NewPost, Post, PostEnvelope,
    SearchResponse, VerificationAnswer, VerificationChallenge,
};
