//! Shared fixtures for store integration tests.

use quill_store::db::stores::{
    AnswerStore, CommentStore, EntityStore, NoteStore, ProjectStore, QuestionStore, TagStore,
    UserStore, WorkspaceStore,
};
use quill_store::models::{Project, User, Workspace};
use quill_store::Database;

/// A migrated in-memory database plus one store per entity.
#[allow(dead_code)]
pub struct TestBackend {
    pub db: Database,
    pub users: UserStore,
    pub workspaces: WorkspaceStore,
    pub projects: ProjectStore,
    pub questions: QuestionStore,
    pub answers: AnswerStore,
    pub notes: NoteStore,
    pub comments: CommentStore,
    pub tags: TagStore,
}

pub async fn backend() -> TestBackend {
    let db = Database::in_memory().await.expect("in-memory database");
    TestBackend {
        users: UserStore::new(&db),
        workspaces: WorkspaceStore::new(&db),
        projects: ProjectStore::new(&db),
        questions: QuestionStore::new(&db),
        answers: AnswerStore::new(&db),
        notes: NoteStore::new(&db),
        comments: CommentStore::new(&db),
        tags: TagStore::new(&db),
        db,
    }
}

/// A user, a workspace they own, and two projects inside it.
#[allow(dead_code)]
pub struct Graph {
    pub alice: User,
    pub bob: User,
    pub workspace: Workspace,
    pub project_a: Project,
    pub project_b: Project,
}

pub async fn seed_graph(backend: &TestBackend) -> Graph {
    let alice = User::new("Alice Carroll", "alice@example.com");
    let bob = User::new("Bob Stone", "bob@example.com");
    backend.users.create(&alice).await.unwrap();
    backend.users.create(&bob).await.unwrap();

    let workspace = Workspace::new("Engineering", &alice.id);
    backend.workspaces.create(&workspace).await.unwrap();

    let project_a = Project::new(&workspace.id, &alice.id, "Alpha");
    let project_b = Project::new(&workspace.id, &bob.id, "Beta");
    backend.projects.create(&project_a).await.unwrap();
    backend.projects.create(&project_b).await.unwrap();

    Graph {
        alice,
        bob,
        workspace,
        project_a,
        project_b,
    }
}
