#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigLocation(String),
    PromptStoreDir,
    PromptMainStore,
    PromptTeacherImage,

    // === STORE MESSAGES ===
    StoreListHeader,
    NoStoresFound,
    StoreCreated(String),
    StoreAlreadyExists(String),
    InvalidStoreName(String),
    StoreRenamed(String, String),
    StoreRenameRefused(String, String),
    StoreDeleted(String),
    StoreNotFound(String),
    MainStoreProtected(String),
    ConfirmDeleteStore(String),

    // === ENTITY MESSAGES ===
    EntityListHeader(String),
    NoEntitiesFound(String),
    EntityCreated(String, i64),
    EntityUpdated(String, i64),
    EntityDeleted(String, i64),
    EntityNotFound(String, i64),
    ConfirmDeleteEntity(String, String),
    EditingEntity(String, i64),
    PromptFieldValue(String),
    InvalidFieldAssignment(String),
    FieldNotEditable(String, String),

    // === SCHEDULE MESSAGES ===
    ScheduleHeader(String, String),
    GroupNotFound(i64),
    LessonNotFound(i64),
    ClassroomNotFound(i64),
    InvalidDay(String),
    DayNotFound(String),
    SlotNotFound(String, usize),
    SlotAdded(String, usize),
    SlotRemoved(String, usize),
    SlotMoved(String, usize, usize),
    SlotMoveRefused(usize),
    LessonAssigned(String, usize),
    ClassroomAssigned(String, usize),
    NoSlots,
    ConflictLegend,

    // === EXPORT MESSAGES ===
    ExportingSchedule(String, String),
    ExportSuccess(String),

    // === GENERAL MESSAGES ===
    OperationCancelled,
    DebugModeEnabled,
}
