flat_mod!(flags, scalar, memory, typed);
