pub mod category_repository;
pub mod question_repository;
pub mod response_repository;
pub mod section_repository;
pub mod user_repository;

pub use category_repository::{CategoryRepository, MongoCategoryRepository};
pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use response_repository::{MongoResponseRepository, ResponseRepository};
pub use section_repository::{MongoSectionRepository, SectionRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
