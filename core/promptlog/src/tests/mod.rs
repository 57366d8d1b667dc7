//! クレート単位のシナリオテスト（スタブ port + tempfile）


use common::adapter::{NoopLog, StdFileSystem};
use common::error::Error;
use common::ports::outbound::{FileSystem, Log, LogRecord};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::outbound::{CompletionService, Prompter, RecordLog, SequenceAllocator, SyncSink};
use crate::usecase::app::{PromptLogDeps, PromptLogUseCase, StorageDeps};

/// 決まった応答を返す CompletionService。呼び出しを記録する。
pub(crate) struct StubCompletionService {
    response: Mutex<Option<Result<String, Error>>>,
    pub calls: Mutex<Vec<(String, u32)>>,
}

impl StubCompletionService {
    pub fn ok(text: &str) -> Self {
        Self {
            response: Mutex::new(Some(Ok(text.to_string()))),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn err(e: Error) -> Self {
        Self {
            response: Mutex::new(Some(Err(e))),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl CompletionService for StubCompletionService {
    fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, Error> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), max_tokens));
        self.response
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(Error::system("stub called twice")))
    }
}

/// commit の呼び出しを記録する SyncSink。fail=true なら Sync エラーを返す。
pub(crate) struct RecordingSyncSink {
    fail: bool,
    pub messages: Mutex<Vec<String>>,
}

impl RecordingSyncSink {
    pub fn new(fail: bool) -> Self {
        Self {
            fail,
            messages: Mutex::new(Vec::new()),
        }
    }
}

impl SyncSink for RecordingSyncSink {
    fn commit(&self, message: &str) -> Result<(), Error> {
        self.messages.lock().unwrap().push(message.to_string());
        if self.fail {
            return Err(Error::sync(
                "Error running git command: git push exited with status 128",
            ));
        }
        Ok(())
    }
}

/// 用意した行・回答を順に返す Prompter
pub(crate) struct ScriptedPrompter {
    lines: Mutex<VecDeque<String>>,
    answers: Mutex<VecDeque<bool>>,
    pub questions: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(lines: &[&str], answers: &[bool]) -> Self {
        Self {
            lines: Mutex::new(lines.iter().map(|s| s.to_string()).collect()),
            answers: Mutex::new(answers.iter().copied().collect()),
            questions: Mutex::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&self, question: &str) -> Result<String, Error> {
        self.questions.lock().unwrap().push(question.to_string());
        Ok(self.lines.lock().unwrap().pop_front().unwrap_or_default())
    }

    fn confirm(&self, question: &str) -> Result<bool, Error> {
        self.questions.lock().unwrap().push(question.to_string());
        Ok(self.answers.lock().unwrap().pop_front().unwrap_or(false))
    }
}

/// テスト用に差し替える port 群
pub(crate) struct TestPorts {
    pub completion: Arc<dyn CompletionService>,
    pub sync_sink: Arc<RecordingSyncSink>,
    pub prompter: Arc<dyn Prompter>,
    pub allocator: Arc<dyn SequenceAllocator>,
    pub record_log: Arc<dyn RecordLog>,
}

pub(crate) fn std_fs() -> Arc<dyn FileSystem> {
    Arc::new(StdFileSystem)
}

/// 受け取ったレコードを保持する Log
#[derive(Default)]
pub(crate) struct RecordingLog {
    pub records: Mutex<Vec<LogRecord>>,
}

impl Log for RecordingLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

pub(crate) fn use_case(ports: &TestPorts) -> PromptLogUseCase {
    use_case_with_log(ports, Arc::new(NoopLog))
}

pub(crate) fn use_case_with_log(ports: &TestPorts, log: Arc<dyn Log>) -> PromptLogUseCase {
    PromptLogUseCase::new(PromptLogDeps {
        storage: StorageDeps {
            fs: std_fs(),
            allocator: Arc::clone(&ports.allocator),
            record_log: Arc::clone(&ports.record_log),
        },
        completion: Arc::clone(&ports.completion),
        sync_sink: Arc::clone(&ports.sync_sink) as Arc<dyn SyncSink>,
        prompter: Arc::clone(&ports.prompter),
        log,
    })
}
